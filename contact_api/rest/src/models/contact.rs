use chrono::{DateTime, Utc};
use contact_core_message_contracts::ContactMessagePublishedAck;
use contact_models::{
    email_address::EmailAddress,
    message::{
        ContactMessage, ContactMessageFilter, ContactMessageId, MessageContent, PhoneNumber,
        ReaderCollection, ReaderUserId, Reason, Sender, SenderAlias,
    },
    pagination::{PaginationLimit, PaginationSlice},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactMessage {
    pub id: ContactMessageId,
    pub message: MessageContent,
    pub reason: Reason,
    pub archived: bool,
    pub responded: bool,
    pub sender: ApiSender,
    pub readers: ApiReaderCollection,
    pub time_created: DateTime<Utc>,
    pub time_updated: DateTime<Utc>,
}

impl ApiContactMessage {
    /// Converts the entity into its response shape. `user_id` drives the
    /// per-user fields of the reader view.
    pub fn of(message: ContactMessage, user_id: Option<&ReaderUserId>) -> Self {
        let readers = ReaderCollection::of(&message.readers, user_id).into();
        Self {
            id: message.id,
            message: message.message,
            reason: message.reason,
            archived: message.archived,
            responded: message.responded,
            sender: message.sender.into(),
            readers,
            time_created: message.time_created,
            time_updated: message.time_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSender {
    pub alias: SenderAlias,
    pub phone: Option<PhoneNumber>,
    pub email: EmailAddress,
    pub ip: String,
    pub user_agent: String,
}

impl From<Sender> for ApiSender {
    fn from(sender: Sender) -> Self {
        Self {
            alias: sender.alias,
            phone: sender.phone,
            email: sender.email,
            ip: sender.ip,
            user_agent: sender.user_agent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReaderCollection {
    pub count: usize,
    pub flagged: bool,
    pub read_by_user: Option<bool>,
    pub flagged_by_user: Option<bool>,
}

impl From<ReaderCollection> for ApiReaderCollection {
    fn from(collection: ReaderCollection) -> Self {
        Self {
            count: collection.count,
            flagged: collection.flagged,
            read_by_user: collection.read_by_user,
            flagged_by_user: collection.flagged_by_user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactMessagePublishedAck {
    pub contact_message_id: ContactMessageId,
    pub publish_confirmation_id: Uuid,
}

impl From<ContactMessagePublishedAck> for ApiContactMessagePublishedAck {
    fn from(ack: ContactMessagePublishedAck) -> Self {
        Self {
            contact_message_id: ack.contact_message_id,
            publish_confirmation_id: ack.publish_confirmation_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactMessageList {
    pub count: u64,
    pub contact_messages: Vec<ApiContactMessage>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiContactMessageFilter {
    pub reason: Option<Reason>,
    pub archived: Option<bool>,
    pub responded: Option<bool>,
}

impl From<ApiContactMessageFilter> for ContactMessageFilter {
    fn from(filter: ApiContactMessageFilter) -> Self {
        Self {
            reason: filter.reason,
            archived: filter.archived,
            responded: filter.responded,
        }
    }
}

/// Zero-indexed page plus page size, converted to the offset the repository
/// understands.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiPaginationQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub limit: PaginationLimit,
}

impl From<ApiPaginationQuery> for PaginationSlice {
    fn from(query: ApiPaginationQuery) -> Self {
        Self {
            limit: query.limit,
            // `page` is caller-supplied and unbounded, the multiplication
            // must not overflow
            offset: query.page.saturating_mul(*query.limit),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReaderQuery {
    pub user_id: Option<ReaderUserId>,
}

#[cfg(test)]
mod tests {
    use contact_demo::contact_message::{BAR, FOO};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn reader_view_without_user() {
        let api = ApiContactMessage::of(FOO.clone(), None);

        assert_eq!(
            api.readers,
            ApiReaderCollection {
                count: 2,
                flagged: true,
                read_by_user: None,
                flagged_by_user: None,
            }
        );
    }

    #[test]
    fn reader_view_with_user() {
        let user_id = "support-2".try_into().unwrap();

        let api = ApiContactMessage::of(FOO.clone(), Some(&user_id));

        assert_eq!(
            api.readers,
            ApiReaderCollection {
                count: 2,
                flagged: true,
                read_by_user: Some(true),
                flagged_by_user: Some(false),
            }
        );
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(ApiContactMessage::of(BAR.clone(), None)).unwrap();

        let object = value.as_object().unwrap();
        assert!(object.contains_key("timeCreated"));
        assert!(object.contains_key("timeUpdated"));
        assert!(object["sender"].as_object().unwrap().contains_key("userAgent"));
        assert_eq!(object["sender"]["ip"], json!("unknown"));
        assert_eq!(object["readers"]["count"], json!(0));
    }

    #[test]
    fn pagination_page_converts_to_offset() {
        let query = ApiPaginationQuery {
            page: 1,
            limit: 10.try_into().unwrap(),
        };

        let slice = PaginationSlice::from(query);

        assert_eq!(slice.offset, 10);
        assert_eq!(*slice.limit, 10);
    }

    #[test]
    fn pagination_page_saturates_instead_of_overflowing() {
        let query = ApiPaginationQuery {
            page: u64::MAX,
            limit: 10.try_into().unwrap(),
        };

        let slice = PaginationSlice::from(query);

        assert_eq!(slice.offset, u64::MAX);
    }
}

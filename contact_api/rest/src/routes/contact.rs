use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Response,
    routing, Extension, Router,
};
use contact_core_message_contracts::{
    ContactMessageCreateError, ContactMessageFeatureService, ContactMessageGetError,
    ContactMessageListError, ContactMessageListQuery, ContactMessagePublishError, RequestIdentity,
};
use contact_forms::{resolve_form, ContactMessageCreationForm, FormResolveError, RawForm};
use uuid::Uuid;

use super::{accepted, auth_error, bad, created, internal_server_error, not_found, ok};
use crate::{
    extractors::{auth::ApiToken, user_agent::UserAgent},
    middlewares::client_ip::ClientIp,
    models::contact::{
        ApiContactMessage, ApiContactMessageFilter, ApiContactMessageList,
        ApiContactMessagePublishedAck, ApiPaginationQuery, ApiReaderQuery,
    },
};

struct ContactState<Svc> {
    service: Arc<Svc>,
    synchronous_create: bool,
}

pub fn router(
    service: Arc<impl ContactMessageFeatureService>,
    synchronous_create: bool,
) -> Router<()> {
    Router::new()
        .route("/mail", routing::post(create).get(list))
        .route("/mail/:contact_message_id", routing::get(get))
        .with_state(Arc::new(ContactState {
            service,
            synchronous_create,
        }))
}

async fn create(
    State(state): State<Arc<ContactState<impl ContactMessageFeatureService>>>,
    Extension(client_ip): Extension<ClientIp>,
    user_agent: UserAgent,
    body: Bytes,
) -> Response {
    let form = match resolve_form::<ContactMessageCreationForm>(RawForm::Bytes(body.to_vec())) {
        Ok(form) => form,
        Err(FormResolveError::Validation(err)) => return bad(err.error_details, err.schema),
        Err(err @ FormResolveError::UnsupportedSchema { .. }) => {
            return internal_server_error(anyhow::Error::from(err))
        }
        Err(FormResolveError::Other(err)) => return internal_server_error(err),
    };

    let identity = RequestIdentity {
        ip: Some(client_ip.0.to_string()),
        user_agent: user_agent.0,
    };

    if state.synchronous_create {
        match state.service.create(form, identity).await {
            Ok(message) => created(ApiContactMessage::of(message, None)),
            Err(ContactMessageCreateError::Other(err)) => internal_server_error(err),
        }
    } else {
        match state.service.publish(form, identity).await {
            Ok(ack) => accepted(ApiContactMessagePublishedAck::from(ack)),
            Err(ContactMessagePublishError::Other(err)) => internal_server_error(err),
        }
    }
}

async fn get(
    State(state): State<Arc<ContactState<impl ContactMessageFeatureService>>>,
    token: ApiToken,
    Path(contact_message_id): Path<String>,
    Query(reader): Query<ApiReaderQuery>,
) -> Response {
    // a malformed id is indistinguishable from an absent one
    let Ok(id) = contact_message_id.parse::<Uuid>() else {
        return not_found(&contact_message_id);
    };

    match state.service.get(&token.0, id.into()).await {
        Ok(message) => ok(ApiContactMessage::of(message, reader.user_id.as_ref())),
        Err(ContactMessageGetError::Auth(err)) => auth_error(err),
        Err(ContactMessageGetError::NotFound { id }) => not_found(&id.to_string()),
        Err(ContactMessageGetError::Other(err)) => internal_server_error(err),
    }
}

async fn list(
    State(state): State<Arc<ContactState<impl ContactMessageFeatureService>>>,
    token: ApiToken,
    Query(pagination): Query<ApiPaginationQuery>,
    Query(filter): Query<ApiContactMessageFilter>,
    Query(reader): Query<ApiReaderQuery>,
) -> Response {
    match state
        .service
        .list(
            &token.0,
            ContactMessageListQuery {
                filter: filter.into(),
                pagination: pagination.into(),
            },
        )
        .await
    {
        Ok(result) => ok(ApiContactMessageList {
            count: result.total,
            contact_messages: result
                .items
                .into_iter()
                .map(|message| ApiContactMessage::of(message, reader.user_id.as_ref()))
                .collect(),
        }),
        Err(ContactMessageListError::Auth(err)) => auth_error(err),
        Err(ContactMessageListError::Other(err)) => internal_server_error(err),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use contact_core_message_contracts::MockContactMessageFeatureService;
    use contact_demo::contact_message::FOO;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    fn state(
        service: MockContactMessageFeatureService,
    ) -> State<Arc<ContactState<MockContactMessageFeatureService>>> {
        State(Arc::new(ContactState {
            service: Arc::new(service),
            synchronous_create: false,
        }))
    }

    async fn response_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn get_malformed_id_is_not_found() {
        // Arrange
        // no expectations: the service must never see a malformed id
        let state = state(MockContactMessageFeatureService::new());

        // Act
        let response = get(
            state,
            ApiToken("token".into()),
            Path("not-a-uuid".into()),
            Query(ApiReaderQuery { user_id: None }),
        )
        .await;

        // Assert
        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["data"], Value::Null);
        assert_eq!(
            body["meta"]["message"],
            json!("Resource with id not-a-uuid does not exist")
        );
    }

    #[tokio::test]
    async fn get_malformed_and_absent_ids_are_indistinguishable() {
        // Arrange
        let id = FOO.id;
        let service = MockContactMessageFeatureService::new().with_get(
            "token",
            id,
            Err(ContactMessageGetError::NotFound { id }),
        );

        // Act
        let absent = get(
            state(service),
            ApiToken("token".into()),
            Path(id.to_string()),
            Query(ApiReaderQuery { user_id: None }),
        )
        .await;
        let malformed = get(
            state(MockContactMessageFeatureService::new()),
            ApiToken("token".into()),
            Path("not-a-uuid".into()),
            Query(ApiReaderQuery { user_id: None }),
        )
        .await;

        // Assert
        let (absent_status, mut absent_body) = response_json(absent).await;
        let (malformed_status, mut malformed_body) = response_json(malformed).await;
        assert_eq!(absent_status, malformed_status);

        let normalize = |body: &mut Value, identifier: &str| {
            let message = body["meta"]["message"]
                .as_str()
                .unwrap()
                .replace(identifier, "{id}");
            body["meta"]["message"] = message.into();
        };
        normalize(&mut absent_body, &id.to_string());
        normalize(&mut malformed_body, "not-a-uuid");
        assert_eq!(absent_body, malformed_body);
    }
}

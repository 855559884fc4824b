use std::{collections::HashMap, str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deref,
    From,
    Display,
    Serialize,
    Deserialize,
))]
pub struct ContactMessageId(uuid::Uuid);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub message: MessageContent,
    pub reason: Reason,
    pub archived: bool,
    pub responded: bool,
    pub sender: Sender,
    pub readers: Vec<Reader>,
    pub time_created: DateTime<Utc>,
    pub time_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub alias: SenderAlias,
    pub phone: Option<PhoneNumber>,
    pub email: EmailAddress,
    /// Source address of the request the message arrived with, never
    /// user-supplied. `"unknown"` when the identity context had none.
    pub ip: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    pub user_id: ReaderUserId,
    pub flagged: bool,
    pub time_updated: DateTime<Utc>,
}

#[nutype(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 2000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct MessageContent(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 50),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct SenderAlias(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 64),
    derive(Debug, Clone, PartialEq, Eq, Hash, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ReaderUserId(String);

/// A normalized phone number. Only digits are storable; the digit count
/// bounds come from the persisted schema.
#[nutype(
    validate(regex = PHONE_DIGITS_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct PhoneNumber(String);

pub static PHONE_DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9]{6,15}$").unwrap());

impl PhoneNumber {
    /// Strips every non-digit character, e.g. `"(123) 456-7890"` becomes
    /// `"1234567890"`. Idempotent.
    pub fn normalize(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Business,
    Question,
    Feedback,
    Other,
}

impl Reason {
    pub const ALL: [Self; 4] = [Self::Business, Self::Question, Self::Feedback, Self::Other];

    /// The canonical wire value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Question => "question",
            Self::Feedback => "feedback",
            Self::Other => "other",
        }
    }
}

// Case-normalizing lookup table, built once from the canonical variant set.
static REASON_TABLE: LazyLock<HashMap<&'static str, Reason>> =
    LazyLock::new(|| Reason::ALL.iter().map(|&r| (r.as_str(), r)).collect());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown reason {0:?}")]
pub struct ReasonParseError(pub String);

impl FromStr for Reason {
    type Err = ReasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REASON_TABLE
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ReasonParseError(s.into()))
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Reason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Reason {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Equality filter over stored contact messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactMessageFilter {
    pub reason: Option<Reason>,
    pub archived: Option<bool>,
    pub responded: Option<bool>,
}

/// Derived, response-only view over a message's readers.
///
/// The per-user fields are `None` when no requesting user id was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderCollection {
    pub count: usize,
    pub flagged: bool,
    pub read_by_user: Option<bool>,
    pub flagged_by_user: Option<bool>,
}

impl ReaderCollection {
    pub fn of(readers: &[Reader], user_id: Option<&ReaderUserId>) -> Self {
        Self {
            count: readers.len(),
            flagged: readers.iter().any(|r| r.flagged),
            read_by_user: user_id.map(|u| readers.iter().any(|r| r.user_id == *u)),
            flagged_by_user: user_id
                .map(|u| readers.iter().any(|r| r.user_id == *u && r.flagged)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn reason_parses_case_insensitively() {
        for (input, expected) in [
            ("business", Reason::Business),
            ("BusINEss", Reason::Business),
            ("OTHER", Reason::Other),
            ("other", Reason::Other),
            ("Question", Reason::Question),
            ("feedback", Reason::Feedback),
        ] {
            assert_eq!(input.parse::<Reason>().unwrap(), expected);
        }
    }

    #[test]
    fn reason_rejects_unknown_values() {
        assert_eq!(
            "complaint".parse::<Reason>(),
            Err(ReasonParseError("complaint".into()))
        );
    }

    #[test]
    fn reason_serializes_to_canonical_wire_value() {
        assert_eq!(
            serde_json::to_string(&Reason::Business).unwrap(),
            "\"business\""
        );
    }

    #[test]
    fn phone_normalize_strips_non_digits() {
        assert_eq!(PhoneNumber::normalize("(123) 456-7890"), "1234567890");
        assert_eq!(PhoneNumber::normalize("+1 (123) 456-7890"), "11234567890");
    }

    #[test]
    fn phone_normalize_is_idempotent() {
        for raw in ["(123) 456-7890", "123456", "  +44 20 7946 0958 "] {
            let once = PhoneNumber::normalize(raw);
            assert_eq!(PhoneNumber::normalize(&once), once);
        }
    }

    #[test]
    fn phone_rejects_unnormalized_input() {
        assert!(PhoneNumber::try_new("123-456-7890").is_err());
        assert!(PhoneNumber::try_new("12345").is_err());
        PhoneNumber::try_new("1234567890").unwrap();
    }

    fn reader(user_id: &str, flagged: bool) -> Reader {
        Reader {
            user_id: user_id.try_into().unwrap(),
            flagged,
            time_updated: Utc.timestamp_opt(1_000_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn reader_collection_without_user() {
        let readers = [reader("123", true), reader("456", false)];

        let collection = ReaderCollection::of(&readers, None);

        assert_eq!(collection.count, 2);
        assert!(collection.flagged);
        assert_eq!(collection.read_by_user, None);
        assert_eq!(collection.flagged_by_user, None);
    }

    #[test]
    fn reader_collection_with_user() {
        let readers = [reader("123", false), reader("456", true)];
        let user = "123".try_into().unwrap();

        let collection = ReaderCollection::of(&readers, Some(&user));

        assert_eq!(collection.read_by_user, Some(true));
        assert_eq!(collection.flagged_by_user, Some(false));
    }

    #[test]
    fn reader_collection_of_empty() {
        let collection = ReaderCollection::of(&[], None);

        assert_eq!(collection.count, 0);
        assert!(!collection.flagged);
    }
}

use std::sync::LazyLock;

use contact_models::message::{ContactMessage, Reader, Reason, Sender};

use crate::{time, UUID1, UUID2};

/// Fully populated message: phone number, two readers, one flag.
pub static FOO: LazyLock<ContactMessage> = LazyLock::new(|| ContactMessage {
    id: UUID1.into(),
    message: "I run a small record store and would like to discuss stocking \
              your products. We have two locations and are looking for a \
              reliable supplier for the coming season."
        .try_into()
        .unwrap(),
    reason: Reason::Business,
    archived: false,
    responded: false,
    sender: Sender {
        alias: "Max Mustermann".try_into().unwrap(),
        phone: Some("1234567890".try_into().unwrap()),
        email: "max.mustermann@example.de".parse().unwrap(),
        ip: "203.0.113.7".into(),
        user_agent: "Mozilla/5.0".into(),
    },
    readers: vec![
        Reader {
            user_id: "support-1".try_into().unwrap(),
            flagged: true,
            time_updated: time(1_700_000_100),
        },
        Reader {
            user_id: "support-2".try_into().unwrap(),
            flagged: false,
            time_updated: time(1_700_000_200),
        },
    ],
    time_created: time(1_700_000_000),
    time_updated: time(1_700_000_200),
});

/// Minimal message: no phone number, untouched by any reader.
pub static BAR: LazyLock<ContactMessage> = LazyLock::new(|| ContactMessage {
    id: UUID2.into(),
    message: "The checkout page kept rejecting my coupon code even though it \
              is listed as valid until the end of the month. It would be \
              great if someone could look into this."
        .try_into()
        .unwrap(),
    reason: Reason::Feedback,
    archived: false,
    responded: false,
    sender: Sender {
        alias: "Erika".try_into().unwrap(),
        phone: None,
        email: "erika@example.com".parse().unwrap(),
        ip: "unknown".into(),
        user_agent: "unknown".into(),
    },
    readers: Vec::new(),
    time_created: time(1_700_100_000),
    time_updated: time(1_700_100_000),
});

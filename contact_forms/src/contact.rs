use contact_models::{
    email_address::EmailAddress,
    message::{MessageContent, PhoneNumber, Reason, SenderAlias},
};
use serde::Deserialize;

use crate::{
    schema::{FieldKind, FieldSpec, FormSchema, REASON_ENUM},
    Form,
};

/// Body of a `POST /mail` submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactMessageCreationForm {
    pub message: MessageContent,
    pub reason: Reason,
    pub sender: SenderCreationForm,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SenderCreationForm {
    pub alias: SenderAlias,
    pub phone: Option<PhoneNumber>,
    pub email: EmailAddress,
}

pub static CONTACT_MESSAGE_CREATION_SCHEMA: FormSchema = FormSchema {
    name: "ContactMessageCreationForm",
    fields: &[
        FieldSpec {
            name: "message",
            required: true,
            kind: FieldKind::String {
                min_chars: Some(100),
                max_chars: Some(2000),
            },
        },
        FieldSpec {
            name: "reason",
            required: true,
            kind: FieldKind::Enum(&REASON_ENUM),
        },
        FieldSpec {
            name: "sender",
            required: true,
            kind: FieldKind::Nested(&SENDER_CREATION_SCHEMA),
        },
    ],
};

pub static SENDER_CREATION_SCHEMA: FormSchema = FormSchema {
    name: "SenderCreationForm",
    fields: &[
        FieldSpec {
            name: "alias",
            required: true,
            kind: FieldKind::String {
                min_chars: Some(1),
                max_chars: Some(50),
            },
        },
        FieldSpec {
            name: "phone",
            required: false,
            kind: FieldKind::Phone,
        },
        FieldSpec {
            name: "email",
            required: true,
            kind: FieldKind::Email,
        },
    ],
};

impl Form for ContactMessageCreationForm {
    const SCHEMA: &'static FormSchema = &CONTACT_MESSAGE_CREATION_SCHEMA;
}

// Deliberately not registered: senders are only ever resolved as part of a
// contact message form.
impl Form for SenderCreationForm {
    const SCHEMA: &'static FormSchema = &SENDER_CREATION_SCHEMA;
}

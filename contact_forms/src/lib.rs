use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

mod contact;
pub mod schema;

pub use contact::{ContactMessageCreationForm, SenderCreationForm};

use schema::FormSchema;

/// Raw caller-supplied input, before any parsing.
#[derive(Debug, Clone)]
pub enum RawForm {
    Bytes(Vec<u8>),
    Text(String),
    Value(Value),
}

/// A form type with a statically registered schema descriptor.
pub trait Form: DeserializeOwned + Sized + 'static {
    const SCHEMA: &'static FormSchema;
}

/// Schemas that [`resolve_form`] accepts. Resolving a form type missing from
/// this list is a configuration error, not a request error.
static REGISTERED_SCHEMAS: &[&FormSchema] = &[&contact::CONTACT_MESSAGE_CREATION_SCHEMA];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Dotted path into the nested structure, e.g. `sender.alias`. `None`
    /// for errors that are not scoped to a single field.
    pub field_name: Option<String>,
    pub description: String,
}

impl ErrorDetail {
    pub fn for_field(path: &str, description: impl Into<String>) -> Self {
        Self {
            field_name: (!path.is_empty()).then(|| path.to_owned()),
            description: description.into(),
        }
    }

    pub fn generic(description: impl Into<String>) -> Self {
        Self {
            field_name: None,
            description: description.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("Form was not validated successfully")]
pub struct FormValidationError {
    pub error_details: Vec<ErrorDetail>,
    /// Shape description of the schema the input was validated against.
    pub schema: Value,
}

#[derive(Debug, Error)]
pub enum FormResolveError {
    #[error("The form schema {schema} is not registered")]
    UnsupportedSchema { schema: &'static str },
    #[error(transparent)]
    Validation(#[from] FormValidationError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Resolves raw input into a validated, typed form.
///
/// Raw bytes and strings are parsed as JSON first; an already decoded value
/// is used directly. Schema violations are collected into one
/// [`ErrorDetail`] per violation; input that does not parse into a JSON
/// object produces exactly one generic detail. Secondary transforms (phone
/// digit-stripping, enum canonicalization) run only after the field
/// validates.
pub fn resolve_form<F: Form>(raw: RawForm) -> Result<F, FormResolveError> {
    let schema = F::SCHEMA;
    if !REGISTERED_SCHEMAS
        .iter()
        .any(|registered| std::ptr::eq(*registered, schema))
    {
        return Err(FormResolveError::UnsupportedSchema {
            schema: schema.name,
        });
    }

    let Some(mut value) = parse_raw(raw) else {
        return Err(FormValidationError {
            error_details: vec![ErrorDetail::generic(
                "Request body is missing or is not a JSON object",
            )],
            schema: schema.describe(),
        }
        .into());
    };

    let error_details = schema.validate(&value);
    if !error_details.is_empty() {
        return Err(FormValidationError {
            error_details,
            schema: schema.describe(),
        }
        .into());
    }

    schema.transform(&mut value);

    // The descriptor walk above guarantees the typed invariants, so a failure
    // here is a schema/type mismatch, not bad input.
    serde_json::from_value(value)
        .with_context(|| format!("Failed to deserialize validated {} form", schema.name))
        .map_err(Into::into)
}

fn parse_raw(raw: RawForm) -> Option<Value> {
    let value = match raw {
        RawForm::Bytes(bytes) => serde_json::from_slice(&bytes).ok()?,
        RawForm::Text(text) => serde_json::from_str(&text).ok()?,
        RawForm::Value(value) => value,
    };
    value.is_object().then_some(value)
}

#[cfg(test)]
mod tests;

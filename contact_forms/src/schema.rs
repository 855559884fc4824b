use std::sync::LazyLock;

use contact_models::{
    email_address::EmailAddress,
    message::{PhoneNumber, Reason},
};
use regex::Regex;
use serde_json::{json, Map, Value};

use crate::ErrorDetail;

/// Statically declared shape of one form type: an ordered list of field
/// descriptors. Schemas are closed; fields not declared here are rejected.
#[derive(Debug)]
pub struct FormSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

#[derive(Debug)]
pub enum FieldKind {
    String {
        min_chars: Option<usize>,
        max_chars: Option<usize>,
    },
    Email,
    /// Loose US/international phone pattern, checked before the digit-strip
    /// transform. The stripped number must contain 6 to 15 digits.
    Phone,
    Enum(&'static EnumTable),
    Nested(&'static FormSchema),
    Bool,
}

/// Case-normalizing lookup over the canonical variant set of an enum.
#[derive(Debug)]
pub struct EnumTable {
    pub name: &'static str,
    pub variants: &'static [&'static str],
    pub canonicalize: fn(&str) -> Option<&'static str>,
}

pub static REASON_ENUM: EnumTable = EnumTable {
    name: "Reason",
    variants: &["business", "question", "feedback", "other"],
    canonicalize: |raw| raw.parse::<Reason>().ok().map(Reason::as_str),
};

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9()./\- ]{6,20}$").unwrap());

const PHONE_MIN_DIGITS: usize = 6;
const PHONE_MAX_DIGITS: usize = 15;

impl FormSchema {
    /// Validates a parsed value against this schema, one error detail per
    /// violation, with dotted paths into the nested structure.
    pub fn validate(&self, value: &Value) -> Vec<ErrorDetail> {
        let mut errors = Vec::new();
        self.validate_object(value, "", &mut errors);
        errors
    }

    fn validate_object(&self, value: &Value, path: &str, errors: &mut Vec<ErrorDetail>) {
        let Value::Object(map) = value else {
            errors.push(ErrorDetail::for_field(path, "Value is not an object"));
            return;
        };

        for key in map.keys() {
            if !self.fields.iter().any(|field| field.name == key) {
                errors.push(ErrorDetail::for_field(
                    &join(path, key),
                    "Unrecognized field",
                ));
            }
        }

        for field in self.fields {
            let field_path = join(path, field.name);
            match map.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        errors.push(ErrorDetail::for_field(&field_path, "Field is required"));
                    }
                }
                Some(value) => field.kind.validate(value, &field_path, errors),
            }
        }
    }

    /// Applies sanitization and the secondary field transforms to an already
    /// validated value: strings are trimmed, enums are canonicalized and
    /// phone numbers are stripped down to their digits.
    pub fn transform(&self, value: &mut Value) {
        let Value::Object(map) = value else { return };
        for field in self.fields {
            if let Some(value) = map.get_mut(field.name) {
                field.kind.transform(value);
            }
        }
    }

    /// JSON description of this schema's shape, included in validation error
    /// responses.
    pub fn describe(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in self.fields {
            properties.insert(field.name.into(), field.kind.describe());
            if field.required {
                required.push(Value::from(field.name));
            }
        }
        json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

impl FieldKind {
    fn validate(&self, value: &Value, path: &str, errors: &mut Vec<ErrorDetail>) {
        match self {
            Self::String {
                min_chars,
                max_chars,
            } => {
                let Some(text) = value.as_str() else {
                    errors.push(ErrorDetail::for_field(path, "Value is not a string"));
                    return;
                };
                let chars = text.trim().chars().count();
                if let Some(min) = *min_chars {
                    if chars < min {
                        errors.push(ErrorDetail::for_field(
                            path,
                            format!("Value is shorter than {min} characters"),
                        ));
                        return;
                    }
                }
                if let Some(max) = *max_chars {
                    if chars > max {
                        errors.push(ErrorDetail::for_field(
                            path,
                            format!("Value is longer than {max} characters"),
                        ));
                    }
                }
            }
            Self::Email => {
                let valid = value
                    .as_str()
                    .is_some_and(|text| text.trim().parse::<EmailAddress>().is_ok());
                if !valid {
                    errors.push(ErrorDetail::for_field(
                        path,
                        "Value is not a valid email address",
                    ));
                }
            }
            Self::Phone => {
                let valid = value.as_str().is_some_and(|text| {
                    let text = text.trim();
                    let digits = PhoneNumber::normalize(text).chars().count();
                    PHONE_PATTERN.is_match(text)
                        && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
                });
                if !valid {
                    errors.push(ErrorDetail::for_field(
                        path,
                        "Value is not a valid phone number",
                    ));
                }
            }
            Self::Enum(table) => {
                let valid = value
                    .as_str()
                    .is_some_and(|text| (table.canonicalize)(text.trim()).is_some());
                if !valid {
                    errors.push(ErrorDetail::for_field(
                        path,
                        format!("Value is not one of: {}", table.variants.join(", ")),
                    ));
                }
            }
            Self::Nested(schema) => schema.validate_object(value, path, errors),
            Self::Bool => {
                if !value.is_boolean() {
                    errors.push(ErrorDetail::for_field(path, "Value is not a boolean"));
                }
            }
        }
    }

    fn transform(&self, value: &mut Value) {
        match self {
            Self::String { .. } | Self::Email => {
                if let Some(text) = value.as_str() {
                    *value = Value::from(text.trim());
                }
            }
            Self::Phone => {
                if let Some(text) = value.as_str() {
                    *value = Value::from(PhoneNumber::normalize(text));
                }
            }
            Self::Enum(table) => {
                if let Some(canonical) = value.as_str().and_then(|text| {
                    (table.canonicalize)(text.trim())
                }) {
                    *value = Value::from(canonical);
                }
            }
            Self::Nested(schema) => schema.transform(value),
            Self::Bool => {}
        }
    }

    fn describe(&self) -> Value {
        match self {
            Self::String {
                min_chars,
                max_chars,
            } => json!({ "type": "string", "minLength": min_chars, "maxLength": max_chars }),
            Self::Email => json!({ "type": "string", "format": "email" }),
            Self::Phone => json!({ "type": "string", "format": "phone" }),
            Self::Enum(table) => json!({ "type": "string", "enum": table.variants }),
            Self::Nested(schema) => schema.describe(),
            Self::Bool => json!({ "type": "boolean" }),
        }
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{path}.{name}")
    }
}

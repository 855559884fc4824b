use contact_forms::ErrorDetail;
use serde::Serialize;
use serde_json::{json, Value};

pub mod contact;

/// Envelope around every response body.
#[derive(Debug, Serialize)]
pub struct ResponseBody<D> {
    pub success: bool,
    pub meta: MetaData,
    pub data: Option<D>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    pub message: String,
    pub error_details: Vec<ErrorDetail>,
    pub schemas: Value,
}

impl MetaData {
    pub fn ok() -> Self {
        Self::message_only("Request completed successfully")
    }

    pub fn bad(error_details: Vec<ErrorDetail>, schema: Value) -> Self {
        Self {
            message: "Given inputs were incorrect. Consult the below details to address the \
                      issue."
                .into(),
            error_details,
            schemas: json!({ "requestBody": schema }),
        }
    }

    pub fn not_found(identifier: &str) -> Self {
        Self::message_only(format!("Resource with id {identifier} does not exist"))
    }

    pub fn internal_error() -> Self {
        Self::message_only("Request failed due to internal server error")
    }

    pub fn invalid_token() -> Self {
        Self::message_only("Request failed due to invalid authentication token")
    }

    fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_details: Vec::new(),
            schemas: json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ok_envelope_shape() {
        let body = ResponseBody {
            success: true,
            meta: MetaData::ok(),
            data: Some(json!({"id": 7})),
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": true,
                "meta": {
                    "message": "Request completed successfully",
                    "errorDetails": [],
                    "schemas": {},
                },
                "data": {"id": 7},
            })
        );
    }

    #[test]
    fn bad_envelope_shape() {
        let body = ResponseBody::<()> {
            success: false,
            meta: MetaData::bad(
                vec![ErrorDetail::for_field("sender.alias", "required field")],
                json!({"type": "object"}),
            ),
            data: None,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": false,
                "meta": {
                    "message": "Given inputs were incorrect. Consult the below details to \
                                address the issue.",
                    "errorDetails": [
                        {"fieldName": "sender.alias", "description": "required field"},
                    ],
                    "schemas": {"requestBody": {"type": "object"}},
                },
                "data": null,
            })
        );
    }

    #[test]
    fn not_found_message_carries_the_identifier() {
        let meta = MetaData::not_found("123");

        assert_eq!(meta.message, "Resource with id 123 does not exist");
    }
}

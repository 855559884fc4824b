use contact_models::message::Reason;
use contact_utils::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::{
    resolve_form, ContactMessageCreationForm, FormResolveError, FormValidationError, RawForm,
    SenderCreationForm,
};

const MESSAGE: &str = "This is a test message that only needs to be longer than one hundred \
                       characters. Let's make it just a bit longer so that the length check \
                       does not complain at us.";

fn valid_form() -> Value {
    json!({
        "message": MESSAGE,
        "reason": "business",
        "sender": {
            "alias": "test",
            "phone": "123-456-7890",
            "email": "test@test.com",
        },
    })
}

fn resolve(value: Value) -> Result<ContactMessageCreationForm, FormResolveError> {
    resolve_form(RawForm::Value(value))
}

fn expect_validation_error(value: Value) -> FormValidationError {
    match resolve(value) {
        Err(FormResolveError::Validation(err)) => err,
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[test]
fn ok_from_value() {
    let form = resolve(valid_form()).unwrap();

    assert_eq!(form.reason, Reason::Business);
    assert_eq!(&**form.sender.alias, "test");
}

#[test]
fn ok_from_text() {
    let text = valid_form().to_string();

    let form = resolve_form::<ContactMessageCreationForm>(RawForm::Text(text));

    form.unwrap();
}

#[test]
fn ok_from_bytes() {
    let bytes = valid_form().to_string().into_bytes();

    let form = resolve_form::<ContactMessageCreationForm>(RawForm::Bytes(bytes));

    form.unwrap();
}

#[test]
fn phone_is_stripped_to_digits() {
    let mut value = valid_form();
    value["sender"]["phone"] = json!("(123) 456-7890");

    let form = resolve(value).unwrap();

    assert_eq!(&**form.sender.phone.unwrap(), "1234567890");
}

#[test]
fn null_phone_stays_null() {
    let mut value = valid_form();
    value["sender"]["phone"] = Value::Null;

    let form = resolve(value).unwrap();

    assert_eq!(form.sender.phone, None);
}

#[test]
fn missing_phone_is_allowed() {
    let mut value = valid_form();
    value["sender"].as_object_mut().unwrap().remove("phone");

    let form = resolve(value).unwrap();

    assert_eq!(form.sender.phone, None);
}

#[test]
fn reason_is_case_insensitive() {
    for (raw, expected) in [
        ("business", Reason::Business),
        ("BusINEss", Reason::Business),
        ("OTHER", Reason::Other),
        ("other", Reason::Other),
    ] {
        let mut value = valid_form();
        value["reason"] = json!(raw);

        let form = resolve(value).unwrap();

        assert_eq!(form.reason, expected);
    }
}

#[test]
fn unparseable_input_yields_exactly_one_generic_detail() {
    let raw_inputs = [
        RawForm::Bytes(Vec::new()),
        RawForm::Text(String::new()),
        RawForm::Text("{".into()),
        RawForm::Text("123".into()),
        RawForm::Value(json!(123)),
        RawForm::Value(Value::Null),
    ];

    for raw in raw_inputs {
        let err = match resolve_form::<ContactMessageCreationForm>(raw.clone()) {
            Err(FormResolveError::Validation(err)) => err,
            other => panic!("Expected a validation error for {raw:?}, got {other:?}"),
        };

        assert_eq!(err.error_details.len(), 1, "input: {raw:?}");
        assert_eq!(err.error_details[0].field_name, None);
        assert_ne!(err.schema, Value::Null);
    }
}

#[test]
fn field_violations_are_scoped_to_their_field() {
    let cases = [
        ("missing reason", {
            let mut v = valid_form();
            v.as_object_mut().unwrap().remove("reason");
            v
        }, "reason"),
        ("null reason", {
            let mut v = valid_form();
            v["reason"] = Value::Null;
            v
        }, "reason"),
        ("unsupported reason", {
            let mut v = valid_form();
            v["reason"] = json!("complaint");
            v
        }, "reason"),
        ("null message", {
            let mut v = valid_form();
            v["message"] = Value::Null;
            v
        }, "message"),
        ("empty message", {
            let mut v = valid_form();
            v["message"] = json!("");
            v
        }, "message"),
        ("empty sender alias", {
            let mut v = valid_form();
            v["sender"]["alias"] = json!("");
            v
        }, "sender.alias"),
        ("empty sender phone", {
            let mut v = valid_form();
            v["sender"]["phone"] = json!("");
            v
        }, "sender.phone"),
        ("malformed sender phone", {
            let mut v = valid_form();
            v["sender"]["phone"] = json!("call me maybe");
            v
        }, "sender.phone"),
        ("malformed sender email", {
            let mut v = valid_form();
            v["sender"]["email"] = json!("not an email");
            v
        }, "sender.email"),
        ("non-string message", {
            let mut v = valid_form();
            v["message"] = json!(123);
            v
        }, "message"),
        ("non-object sender", {
            let mut v = valid_form();
            v["sender"] = json!("test");
            v
        }, "sender"),
    ];

    for (name, value, expected_field) in cases {
        let err = expect_validation_error(value);

        assert_eq!(err.error_details.len(), 1, "case: {name}");
        assert_eq!(
            err.error_details[0].field_name.as_deref(),
            Some(expected_field),
            "case: {name}"
        );
    }
}

#[test]
fn message_longer_than_entity_bound_is_rejected() {
    let mut value = valid_form();
    value["message"] = json!("x".repeat(2001));

    let err = expect_validation_error(value);

    assert_eq!(err.error_details.len(), 1);
    assert_eq!(err.error_details[0].field_name.as_deref(), Some("message"));
}

#[test]
fn unknown_top_level_field_is_rejected() {
    let mut value = valid_form();
    value["subject"] = json!("extra");

    let err = expect_validation_error(value);

    assert_eq!(err.error_details.len(), 1);
    assert_eq!(err.error_details[0].field_name.as_deref(), Some("subject"));
}

#[test]
fn unknown_nested_field_is_rejected() {
    let mut value = valid_form();
    value["sender"]["nickname"] = json!("extra");

    let err = expect_validation_error(value);

    assert_eq!(err.error_details.len(), 1);
    assert_eq!(
        err.error_details[0].field_name.as_deref(),
        Some("sender.nickname")
    );
}

#[test]
fn each_violation_is_reported() {
    let value = json!({
        "message": "too short",
        "reason": "complaint",
        "sender": { "alias": "", "email": "nope" },
    });

    let err = expect_validation_error(value);

    let mut fields = err
        .error_details
        .iter()
        .filter_map(|detail| detail.field_name.as_deref())
        .collect::<Vec<_>>();
    fields.sort_unstable();
    assert_eq!(
        fields,
        ["message", "reason", "sender.alias", "sender.email"]
    );
}

#[test]
fn whitespace_is_trimmed_before_validation() {
    let mut value = valid_form();
    value["sender"]["alias"] = json!("  test  ");
    value["sender"]["email"] = json!(" test@test.com ");

    let form = resolve(value).unwrap();

    assert_eq!(&**form.sender.alias, "test");
    assert_eq!(form.sender.email.as_str(), "test@test.com");
}

#[test]
fn unregistered_schema_is_a_programmer_error() {
    let sender = json!({ "alias": "test", "email": "test@test.com" });

    let result = resolve_form::<SenderCreationForm>(RawForm::Value(sender));

    assert_matches!(
        result,
        Err(FormResolveError::UnsupportedSchema {
            schema: "SenderCreationForm"
        })
    );
}

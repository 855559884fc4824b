use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contact_auth_contracts::AuthenticateError;
use contact_forms::ErrorDetail;
use serde::Serialize;
use serde_json::Value;

use crate::models::{MetaData, ResponseBody};

pub mod contact;

pub fn ok(data: impl Serialize) -> Response {
    envelope(StatusCode::OK, MetaData::ok(), Some(data))
}

pub fn created(data: impl Serialize) -> Response {
    envelope(StatusCode::CREATED, MetaData::ok(), Some(data))
}

pub fn accepted(data: impl Serialize) -> Response {
    envelope(StatusCode::ACCEPTED, MetaData::ok(), Some(data))
}

pub fn bad(error_details: Vec<ErrorDetail>, schema: Value) -> Response {
    envelope::<()>(
        StatusCode::BAD_REQUEST,
        MetaData::bad(error_details, schema),
        None,
    )
}

pub fn not_found(identifier: &str) -> Response {
    envelope::<()>(StatusCode::NOT_FOUND, MetaData::not_found(identifier), None)
}

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    envelope::<()>(
        StatusCode::INTERNAL_SERVER_ERROR,
        MetaData::internal_error(),
        None,
    )
}

pub fn auth_error(err: AuthenticateError) -> Response {
    match err {
        AuthenticateError::InvalidToken => {
            envelope::<()>(StatusCode::UNAUTHORIZED, MetaData::invalid_token(), None)
        }
        AuthenticateError::Other(err) => internal_server_error(err),
    }
}

fn envelope<D: Serialize>(code: StatusCode, meta: MetaData, data: Option<D>) -> Response {
    let body = ResponseBody {
        success: code.as_u16() < 400,
        meta,
        data,
    };
    (code, Json(body)).into_response()
}

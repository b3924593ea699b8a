//! Canonical JSON responses for the proxy routes.

use askbridge_client::ToolError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

pub(crate) fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Unauthorized"})),
    )
        .into_response()
}

pub(crate) fn missing_field(name: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": format!("{name} is required")})),
    )
        .into_response()
}

pub(crate) fn internal(err: impl std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": err.to_string()})),
    )
        .into_response()
}

/// Forwarded tool result: the backend's JSON verbatim on success, a 500
/// carrying the typed error's display string otherwise.
pub(crate) fn tool_result(result: Result<Value, ToolError>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(err) => internal(err),
    }
}

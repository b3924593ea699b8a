//! Tool-proxy routes. Each one gates on the `X-API-Key` shared secret
//! before the request body or query string is even parsed, validates its
//! required fields by name, forwards to the matching managed-tool
//! operation, and returns the backend's JSON verbatim.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::{responses, security, AppState};

/// Body parsing happens only after the key check, so a bad payload on an
/// unauthorized request still yields the canonical 401. Anything that is
/// not a JSON object reads as `Null`, which fails the field lookups below.
fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

fn str_field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.get(name)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[utoipa::path(
    post,
    path = "/browse",
    tag = "Tools",
    request_body = Value,
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn browse(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let body = parse_body(&bytes);
    let Some(url) = str_field(&body, "url") else {
        return responses::missing_field("url");
    };
    responses::tool_result(state.tools().browse(url).await)
}

#[utoipa::path(
    post,
    path = "/browse-multi",
    tag = "Tools",
    request_body = Value,
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn browse_multi(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let body = parse_body(&bytes);
    let urls: Vec<String> = body
        .get("urls")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if urls.is_empty() {
        return responses::missing_field("urls");
    }
    responses::tool_result(state.tools().browse_many(&urls).await)
}

#[derive(Deserialize, IntoParams)]
pub(crate) struct SchemaParams {
    #[serde(default)]
    database_url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/database/schema",
    tag = "Tools",
    params(SchemaParams),
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn database_schema(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SchemaParams>, QueryRejection>,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let database_url = match params.ok().and_then(|Query(params)| params.database_url) {
        Some(url) if !url.trim().is_empty() => url,
        _ => return responses::missing_field("database_url"),
    };
    responses::tool_result(state.tools().database_schema(database_url.trim()).await)
}

#[utoipa::path(
    post,
    path = "/database/query",
    tag = "Tools",
    request_body = Value,
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn database_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let body = parse_body(&bytes);
    let Some(query) = str_field(&body, "query") else {
        return responses::missing_field("query");
    };
    let Some(database_url) = str_field(&body, "database_url") else {
        return responses::missing_field("database_url");
    };
    responses::tool_result(state.tools().database_query(query, database_url).await)
}

#[utoipa::path(
    post,
    path = "/code/execute",
    tag = "Tools",
    request_body = Value,
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn code_execute(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let body = parse_body(&bytes);
    let Some(code) = str_field(&body, "code") else {
        return responses::missing_field("code");
    };
    let Some(language) = str_field(&body, "language") else {
        return responses::missing_field("language");
    };
    responses::tool_result(state.tools().execute_code(code, language).await)
}

#[utoipa::path(
    post,
    path = "/dyno/command",
    tag = "Tools",
    request_body = Value,
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn dyno_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let body = parse_body(&bytes);
    let Some(command) = str_field(&body, "command") else {
        return responses::missing_field("command");
    };
    responses::tool_result(state.tools().dyno_command(command).await)
}

#[utoipa::path(
    post,
    path = "/pdf/read",
    tag = "Tools",
    request_body = Value,
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn pdf_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let body = parse_body(&bytes);
    let Some(pdf_url) = str_field(&body, "pdf_url") else {
        return responses::missing_field("pdf_url");
    };
    responses::tool_result(state.tools().read_pdf(pdf_url).await)
}

#[utoipa::path(
    post,
    path = "/search",
    tag = "Tools",
    request_body = Value,
    responses((status = 200), (status = 400), (status = 401), (status = 500))
)]
pub(crate) async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if !security::api_key_ok(&headers, state.config()) {
        return responses::unauthorized();
    }
    let body = parse_body(&bytes);
    let Some(query) = str_field(&body, "query") else {
        return responses::missing_field("query");
    };
    responses::tool_result(state.tools().search(query).await)
}

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::router;

/// Health probe.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Meta",
    responses((status = 200, description = "Service healthy", body = serde_json::Value))
)]
pub(crate) async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

/// Service metadata and endpoint index.
#[utoipa::path(
    get,
    path = "/about",
    tag = "Meta",
    responses((status = 200, description = "Service metadata", body = serde_json::Value))
)]
pub(crate) async fn about() -> impl IntoResponse {
    let endpoints = router::endpoint_index();
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "counts": {"total": endpoints.len()},
        "endpoints": endpoints,
    }))
}

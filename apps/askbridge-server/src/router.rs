use axum::routing::{get, post};
use axum::Router;

use crate::{api_ask, api_meta, api_tools, api_ui, openapi, AppState};

pub(crate) mod paths {
    pub const HOME: &str = "/";
    pub const CLEAR: &str = "/clear";
    pub const REMOVE_FILE: &str = "/remove-file";
    pub const API_ASK: &str = "/api/ask";
    pub const BROWSE: &str = "/browse";
    pub const BROWSE_MULTI: &str = "/browse-multi";
    pub const DATABASE_SCHEMA: &str = "/database/schema";
    pub const DATABASE_QUERY: &str = "/database/query";
    pub const CODE_EXECUTE: &str = "/code/execute";
    pub const DYNO_COMMAND: &str = "/dyno/command";
    pub const PDF_READ: &str = "/pdf/read";
    pub const SEARCH: &str = "/search";
    pub const HEALTHZ: &str = "/healthz";
    pub const ABOUT: &str = "/about";
    pub const OPENAPI_YAML: &str = "/spec/openapi.yaml";
}

pub(crate) fn build_router() -> Router<AppState> {
    Router::new()
        .route(paths::HOME, get(api_ui::home_get).post(api_ui::home_post))
        .route(paths::CLEAR, get(api_ui::clear_history))
        .route(paths::REMOVE_FILE, post(api_ui::remove_file))
        .route(paths::API_ASK, post(api_ask::api_ask))
        .route(paths::BROWSE, post(api_tools::browse))
        .route(paths::BROWSE_MULTI, post(api_tools::browse_multi))
        .route(paths::DATABASE_SCHEMA, get(api_tools::database_schema))
        .route(paths::DATABASE_QUERY, post(api_tools::database_query))
        .route(paths::CODE_EXECUTE, post(api_tools::code_execute))
        .route(paths::DYNO_COMMAND, post(api_tools::dyno_command))
        .route(paths::PDF_READ, post(api_tools::pdf_read))
        .route(paths::SEARCH, post(api_tools::search))
        .route(paths::HEALTHZ, get(api_meta::healthz))
        .route(paths::ABOUT, get(api_meta::about))
        .route(paths::OPENAPI_YAML, get(openapi::openapi_yaml))
}

/// Endpoint index served by `/about`.
pub(crate) fn endpoint_index() -> Vec<String> {
    [
        ("GET", paths::HOME),
        ("POST", paths::HOME),
        ("GET", paths::CLEAR),
        ("POST", paths::REMOVE_FILE),
        ("POST", paths::API_ASK),
        ("POST", paths::BROWSE),
        ("POST", paths::BROWSE_MULTI),
        ("GET", paths::DATABASE_SCHEMA),
        ("POST", paths::DATABASE_QUERY),
        ("POST", paths::CODE_EXECUTE),
        ("POST", paths::DYNO_COMMAND),
        ("POST", paths::PDF_READ),
        ("POST", paths::SEARCH),
        ("GET", paths::HEALTHZ),
        ("GET", paths::ABOUT),
        ("GET", paths::OPENAPI_YAML),
    ]
    .into_iter()
    .map(|(method, path)| format!("{method} {path}"))
    .collect()
}

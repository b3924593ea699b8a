use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use utoipa::OpenApi;

use crate::responses;

#[derive(OpenApi)]
#[openapi(
    info(title = "askbridge", description = "Q&A front end and managed-tool proxy"),
    paths(
        crate::api_meta::healthz,
        crate::api_meta::about,
        crate::api_ask::api_ask,
        crate::api_tools::browse,
        crate::api_tools::browse_multi,
        crate::api_tools::database_schema,
        crate::api_tools::database_query,
        crate::api_tools::code_execute,
        crate::api_tools::dyno_command,
        crate::api_tools::pdf_read,
        crate::api_tools::search,
    ),
    components(schemas(crate::api_ask::AskReq))
)]
pub(crate) struct ApiDoc;

pub(crate) async fn openapi_yaml() -> Response {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/yaml")],
            yaml,
        )
            .into_response(),
        Err(err) => responses::internal(err),
    }
}

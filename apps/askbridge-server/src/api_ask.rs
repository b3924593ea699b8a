use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::{responses, AppState};

#[derive(Deserialize, ToSchema)]
pub(crate) struct AskReq {
    #[serde(default)]
    pub question: String,
}

/// Unauthenticated question endpoint; the chat client's degrade policy means
/// this always answers with *something*.
#[utoipa::path(
    post,
    path = "/api/ask",
    tag = "Ask",
    request_body = AskReq,
    responses(
        (status = 200, description = "Question and answer", body = serde_json::Value),
        (status = 400, description = "Missing question")
    )
)]
pub(crate) async fn api_ask(
    State(state): State<AppState>,
    Json(req): Json<AskReq>,
) -> Response {
    let question = req.question.trim();
    if question.is_empty() {
        return responses::missing_field("question");
    }
    let answer = state.chat().complete(question).await;
    Json(json!({"question": question, "answer": answer})).into_response()
}

//! The HTML surface: the Q&A page, history clearing, and uploaded-file
//! removal. Upload and question handling are independent sub-actions of the
//! same POST; the final render always reflects whatever state they left.

use std::path::Path;

use askbridge_client::embeddings::DEFAULT_INPUT_TYPE;
use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{info, warn};

use crate::history::QaEntry;
use crate::router::paths;
use crate::session::{self, DocumentState};
use crate::util::{clip_context, html_escape, sanitize_file_name};
use crate::AppState;

pub(crate) async fn home_get(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (sid, is_new) = ensure_session(&headers);
    let page = render(&state, &sid).await;
    with_session_cookie(page, &sid, is_new)
}

pub(crate) async fn home_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let (sid, is_new) = ensure_session(&headers);

    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut question: Option<String> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                if let (Some(file_name), Ok(data)) = (file_name, field.bytes().await) {
                    if !file_name.is_empty() && !data.is_empty() {
                        upload = Some((file_name, data.to_vec()));
                    }
                }
            }
            Some("question") => {
                if let Ok(text) = field.text().await {
                    let trimmed = text.trim().to_string();
                    if !trimmed.is_empty() {
                        question = Some(trimmed);
                    }
                }
            }
            _ => {}
        }
    }

    if let Some((file_name, data)) = upload {
        handle_upload(&state, &sid, file_name, data).await;
    }
    if let Some(question) = question {
        handle_question(&state, &sid, &question).await;
    }

    let page = render(&state, &sid).await;
    with_session_cookie(page, &sid, is_new)
}

pub(crate) async fn clear_history(State(state): State<AppState>) -> Redirect {
    state.history().lock().await.clear();
    Redirect::to(paths::HOME)
}

pub(crate) async fn remove_file(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    if let Some(sid) = session::session_id(&headers) {
        if let Some(document) = state.sessions().take_document(&sid).await {
            if let Err(err) = tokio::fs::remove_file(&document.stored_path).await {
                warn!(
                    target: "ui",
                    path = %document.stored_path.display(),
                    error = %err,
                    "failed to delete stored upload"
                );
            }
        }
    }
    StatusCode::NO_CONTENT
}

/// Save, extract, and embed an upload, replacing the session's document
/// state on success. Every failure becomes a flash message; the page still
/// renders.
async fn handle_upload(state: &AppState, sid: &str, file_name: String, data: Vec<u8>) {
    let sessions = state.sessions();
    let extension = Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !askbridge_extract::is_supported_extension(&extension) {
        sessions
            .flash(sid, format!("Unsupported file type: .{extension}"))
            .await;
        return;
    }

    // Uploads are namespaced by session id so identical filenames from
    // different browsers never share a backing file.
    let session_dir = state.config().upload_dir.join(sid);
    let stored_name = sanitize_file_name(&file_name);
    let stored_path = session_dir.join(stored_name);
    let stored = async {
        tokio::fs::create_dir_all(&session_dir).await?;
        tokio::fs::write(&stored_path, &data).await
    }
    .await;
    if let Err(err) = stored {
        warn!(target: "ui", error = %err, "failed to store upload");
        sessions.flash(sid, "Could not save the uploaded file.").await;
        return;
    }

    let extract_path = stored_path.clone();
    let extracted =
        tokio::task::spawn_blocking(move || askbridge_extract::extract(&extract_path)).await;
    let text = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            sessions
                .flash(sid, format!("Could not read {file_name}: {err}"))
                .await;
            discard_upload(state, sid, &stored_path).await;
            return;
        }
        Err(err) => {
            warn!(target: "ui", error = %err, "extraction task failed");
            sessions.flash(sid, "Could not read the uploaded file.").await;
            discard_upload(state, sid, &stored_path).await;
            return;
        }
    };

    match state
        .embeddings()
        .embed(&[text.clone()], DEFAULT_INPUT_TYPE)
        .await
    {
        Ok(embeddings) => {
            // A successful upload replaces the prior document wholesale,
            // including its backing file.
            if let Some(previous) = sessions.take_document(sid).await {
                if previous.stored_path != stored_path {
                    let _ = tokio::fs::remove_file(&previous.stored_path).await;
                }
            }
            info!(target: "ui", file = %file_name, "document uploaded and embedded");
            sessions
                .set_document(
                    sid,
                    DocumentState {
                        file_name,
                        stored_path,
                        text,
                        embeddings,
                    },
                )
                .await;
        }
        Err(err) => {
            sessions
                .flash(sid, format!("Could not embed {file_name}: {err}"))
                .await;
            discard_upload(state, sid, &stored_path).await;
        }
    }
}

/// Delete a rejected upload's file. When a re-upload under the same name
/// has already overwritten a stored document's backing file, the stale
/// document state is cleared along with it rather than left pointing at a
/// deleted path.
async fn discard_upload(state: &AppState, sid: &str, stored_path: &Path) {
    let sessions = state.sessions();
    if let Some(previous) = sessions.document(sid).await {
        if previous.stored_path.as_path() == stored_path {
            sessions.take_document(sid).await;
        }
    }
    let _ = tokio::fs::remove_file(stored_path).await;
}

/// Ask the chat backend, prefixing the question with document context when a
/// document is stored, then record the pair in the history ring.
async fn handle_question(state: &AppState, sid: &str, question: &str) {
    let prompt = match state.sessions().document(sid).await {
        Some(document) => format!(
            "Context from uploaded document '{}':\n{}\n\nQuestion: {}",
            document.file_name,
            clip_context(&document.text),
            question
        ),
        None => question.to_string(),
    };
    let answer = state.chat().complete(&prompt).await;
    state.history().lock().await.insert(question, &answer);
}

async fn render(state: &AppState, sid: &str) -> Html<String> {
    let history = state.history().lock().await.snapshot();
    let document = state.sessions().document(sid).await;
    let flash = state.sessions().take_flash(sid).await;
    Html(render_page(&history, document.as_ref(), flash.as_deref()))
}

fn ensure_session(headers: &HeaderMap) -> (String, bool) {
    match session::session_id(headers) {
        Some(sid) => (sid, false),
        None => (session::new_session_id(), true),
    }
}

fn with_session_cookie(page: Html<String>, sid: &str, is_new: bool) -> Response {
    let mut response = page.into_response();
    if is_new {
        response
            .headers_mut()
            .insert(header::SET_COOKIE, session::set_cookie_value(sid));
    }
    response
}

fn render_page(history: &[QaEntry], document: Option<&DocumentState>, flash: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<!doctype html><html><head><title>askbridge</title></head><body>");
    body.push_str("<h1>askbridge</h1>");

    if let Some(flash) = flash {
        body.push_str(&format!(
            "<p class=\"flash\">{}</p>",
            html_escape(flash)
        ));
    }

    match document {
        Some(document) => body.push_str(&format!(
            "<p>Current document: <strong>{}</strong> \
             <form method=\"post\" action=\"{}\"><button>Remove</button></form></p>",
            html_escape(&document.file_name),
            paths::REMOVE_FILE,
        )),
        None => body.push_str("<p>No document uploaded.</p>"),
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">\
         <input type=\"file\" name=\"file\">\
         <input type=\"text\" name=\"question\" placeholder=\"Ask a question\">\
         <button>Send</button></form>",
        paths::HOME,
    ));

    body.push_str("<h2>Recent questions</h2>");
    if history.is_empty() {
        body.push_str("<p>No questions yet.</p>");
    } else {
        body.push_str("<ol>");
        for entry in history {
            body.push_str(&format!(
                "<li><strong>{}</strong><br>{}</li>",
                html_escape(&entry.question),
                html_escape(&entry.answer)
            ));
        }
        body.push_str("</ol>");
        body.push_str(&format!("<p><a href=\"{}\">Clear history</a></p>", paths::CLEAR));
    }

    body.push_str("</body></html>");
    body
}

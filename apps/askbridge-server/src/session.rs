//! Server-side session state, keyed by a `sid` cookie.
//!
//! Holds the per-browser uploaded-document state and a one-shot flash
//! message consumed at the next page render. Process-lifetime only.

use std::collections::HashMap;
use std::path::PathBuf;

use axum::http::{header, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio::sync::Mutex;

pub(crate) const SESSION_COOKIE: &str = "sid";

/// The current uploaded document for one session. Replaced wholesale by a
/// new upload; removed (with its backing file) by the remove operation.
#[derive(Clone, Debug)]
pub(crate) struct DocumentState {
    pub file_name: String,
    pub stored_path: PathBuf,
    pub text: String,
    #[allow(dead_code)]
    pub embeddings: Value,
}

#[derive(Default)]
struct Session {
    document: Option<DocumentState>,
    flash: Option<String>,
}

#[derive(Default)]
pub(crate) struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn flash(&self, sid: &str, message: impl Into<String>) {
        let mut map = self.inner.lock().await;
        map.entry(sid.to_string()).or_default().flash = Some(message.into());
    }

    pub async fn take_flash(&self, sid: &str) -> Option<String> {
        let mut map = self.inner.lock().await;
        map.get_mut(sid).and_then(|session| session.flash.take())
    }

    pub async fn document(&self, sid: &str) -> Option<DocumentState> {
        let map = self.inner.lock().await;
        map.get(sid).and_then(|session| session.document.clone())
    }

    pub async fn set_document(&self, sid: &str, document: DocumentState) {
        let mut map = self.inner.lock().await;
        map.entry(sid.to_string()).or_default().document = Some(document);
    }

    pub async fn take_document(&self, sid: &str) -> Option<DocumentState> {
        let mut map = self.inner.lock().await;
        map.get_mut(sid).and_then(|session| session.document.take())
    }
}

/// Session id from the request's `Cookie` header, if any.
pub(crate) fn session_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

pub(crate) fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn set_cookie_value(sid: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={sid}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .expect("session cookie header value")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_parses_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sid=abc-123; lang=en"),
        );
        assert_eq!(session_id(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn session_id_absent_without_cookie() {
        assert!(session_id(&HeaderMap::new()).is_none());
    }

    #[tokio::test]
    async fn flash_is_consumed_once() {
        let store = SessionStore::new();
        store.flash("s1", "upload failed").await;
        assert_eq!(store.take_flash("s1").await.as_deref(), Some("upload failed"));
        assert!(store.take_flash("s1").await.is_none());
    }

    #[tokio::test]
    async fn document_is_replaced_wholesale() {
        let store = SessionStore::new();
        let doc = |name: &str| DocumentState {
            file_name: name.to_string(),
            stored_path: PathBuf::from(name),
            text: "text".into(),
            embeddings: serde_json::json!({}),
        };
        store.set_document("s1", doc("a.txt")).await;
        store.set_document("s1", doc("b.txt")).await;
        assert_eq!(store.document("s1").await.unwrap().file_name, "b.txt");
        assert_eq!(store.take_document("s1").await.unwrap().file_name, "b.txt");
        assert!(store.document("s1").await.is_none());
    }
}

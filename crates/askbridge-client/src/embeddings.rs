//! Embedding client. Unlike the chat client, failures here propagate: the
//! web surface turns them into a flash message instead of silently storing a
//! half-initialized document state.

use serde_json::{json, Value};
use tracing::warn;

use crate::{http, join_url, Endpoint};

pub const DEFAULT_INPUT_TYPE: &str = "search_document";

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding request returned status {status}")]
    Status { status: u16 },
    #[error("embedding request failed: {0}")]
    Transport(String),
    #[error("embedding endpoint not configured")]
    NotConfigured,
}

pub struct EmbeddingClient {
    endpoint: Option<Endpoint>,
}

impl EmbeddingClient {
    pub fn new(endpoint: Option<Endpoint>) -> Self {
        Self { endpoint }
    }

    /// Embed a batch of texts in a single request and return the provider's
    /// raw response verbatim.
    pub async fn embed(&self, texts: &[String], input_type: &str) -> Result<Value, EmbeddingError> {
        let endpoint = self.endpoint.as_ref().ok_or(EmbeddingError::NotConfigured)?;
        let url = join_url(&endpoint.base_url, "/v1/embeddings");
        let body = json!({
            "model": endpoint.model,
            "input": texts,
            "input_type": input_type,
            "encoding_format": "base64",
            "embedding_types": ["float"],
        });

        let response = http::client()
            .post(&url)
            .bearer_auth(&endpoint.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(target: "embeddings", error = %err, "embedding request failed");
                EmbeddingError::Transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: "embeddings", status = status.as_u16(), "embedding returned non-200");
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
            });
        }
        response.json::<Value>().await.map_err(|err| {
            warn!(target: "embeddings", error = %err, "embedding response unreadable");
            EmbeddingError::Transport(err.to_string())
        })
    }
}

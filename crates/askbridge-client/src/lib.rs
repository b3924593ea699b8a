//! HTTP clients for askbridge's external providers.
//!
//! Two error policies coexist deliberately. [`chat::ChatClient`] degrades
//! every failure into a displayable string so the page always has something
//! to render; the embedding and tool clients return typed errors and leave
//! the decision to the caller.

mod http;

pub mod chat;
pub mod embeddings;
pub mod tools;

pub use chat::ChatClient;
pub use embeddings::{EmbeddingClient, EmbeddingError};
pub use tools::{ToolClient, ToolError};

/// A model-backed provider endpoint (chat completion or embeddings).
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

/// The managed-tool backend; carries no model identifier.
#[derive(Clone, Debug)]
pub struct Backend {
    pub base_url: String,
    pub api_key: String,
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

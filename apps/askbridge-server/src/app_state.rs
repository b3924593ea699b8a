use std::sync::Arc;

use askbridge_client::{ChatClient, EmbeddingClient, ToolClient};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::history::HistoryRing;
use crate::session::SessionStore;

/// Owned application context handed to every handler. The history ring is
/// process-wide (visible to all sessions); the session store keys document
/// state per browser. Both sit behind async mutexes so concurrent handlers
/// on the multi-threaded runtime stay consistent.
#[derive(Clone)]
pub(crate) struct AppState {
    config: Arc<Config>,
    history: Arc<Mutex<HistoryRing>>,
    sessions: Arc<SessionStore>,
    chat: Arc<ChatClient>,
    embeddings: Arc<EmbeddingClient>,
    tools: Arc<ToolClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let chat = Arc::new(ChatClient::new(config.inference.clone()));
        let embeddings = Arc::new(EmbeddingClient::new(config.embedding.clone()));
        let tools = Arc::new(ToolClient::new(config.tools.clone()));
        Self {
            config: Arc::new(config),
            history: Arc::new(Mutex::new(HistoryRing::new())),
            sessions: Arc::new(SessionStore::new()),
            chat,
            embeddings,
            tools,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> Arc<Mutex<HistoryRing>> {
        self.history.clone()
    }

    pub fn sessions(&self) -> Arc<SessionStore> {
        self.sessions.clone()
    }

    pub fn chat(&self) -> Arc<ChatClient> {
        self.chat.clone()
    }

    pub fn embeddings(&self) -> Arc<EmbeddingClient> {
        self.embeddings.clone()
    }

    pub fn tools(&self) -> Arc<ToolClient> {
        self.tools.clone()
    }
}

//! Managed-tool proxy client: eight fixed operations, each a verbatim
//! request/response pass-through. Non-2xx statuses and transport failures
//! both propagate after being logged with the operation name; there are no
//! retries and no timeout beyond the shared transport default.

use serde_json::{json, Value};
use tracing::warn;

use crate::{http, join_url, Backend};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolOp {
    Browse,
    BrowseMulti,
    DatabaseSchema,
    DatabaseQuery,
    CodeExecute,
    DynoCommand,
    PdfRead,
    Search,
}

impl ToolOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolOp::Browse => "browse",
            ToolOp::BrowseMulti => "browse_multi",
            ToolOp::DatabaseSchema => "database_schema",
            ToolOp::DatabaseQuery => "database_query",
            ToolOp::CodeExecute => "code_execute",
            ToolOp::DynoCommand => "dyno_command",
            ToolOp::PdfRead => "pdf_read",
            ToolOp::Search => "search",
        }
    }

    fn path(self) -> &'static str {
        match self {
            ToolOp::Browse => "/v1/browse",
            ToolOp::BrowseMulti => "/v1/browse/batch",
            ToolOp::DatabaseSchema => "/v1/database/schema",
            ToolOp::DatabaseQuery => "/v1/database/query",
            ToolOp::CodeExecute => "/v1/code/execute",
            ToolOp::DynoCommand => "/v1/dyno/command",
            ToolOp::PdfRead => "/v1/pdf/read",
            ToolOp::Search => "/v1/search",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{op} failed with status {status}")]
    Status {
        op: &'static str,
        status: u16,
        body: String,
    },
    #[error("{op} request failed: {message}")]
    Transport { op: &'static str, message: String },
    #[error("managed-tool backend not configured")]
    NotConfigured,
}

pub struct ToolClient {
    backend: Option<Backend>,
}

impl ToolClient {
    pub fn new(backend: Option<Backend>) -> Self {
        Self { backend }
    }

    pub async fn browse(&self, url: &str) -> Result<Value, ToolError> {
        self.post(ToolOp::Browse, json!({"url": url})).await
    }

    pub async fn browse_many(&self, urls: &[String]) -> Result<Value, ToolError> {
        self.post(ToolOp::BrowseMulti, json!({"urls": urls})).await
    }

    pub async fn database_schema(&self, database_url: &str) -> Result<Value, ToolError> {
        self.get(ToolOp::DatabaseSchema, &[("database_url", database_url)])
            .await
    }

    pub async fn database_query(
        &self,
        query: &str,
        database_url: &str,
    ) -> Result<Value, ToolError> {
        self.post(
            ToolOp::DatabaseQuery,
            json!({"query": query, "database_url": database_url}),
        )
        .await
    }

    pub async fn execute_code(&self, code: &str, language: &str) -> Result<Value, ToolError> {
        self.post(
            ToolOp::CodeExecute,
            json!({"code": code, "language": language}),
        )
        .await
    }

    pub async fn dyno_command(&self, command: &str) -> Result<Value, ToolError> {
        self.post(ToolOp::DynoCommand, json!({"command": command}))
            .await
    }

    pub async fn read_pdf(&self, pdf_url: &str) -> Result<Value, ToolError> {
        self.post(ToolOp::PdfRead, json!({"pdf_url": pdf_url})).await
    }

    pub async fn search(&self, query: &str) -> Result<Value, ToolError> {
        self.post(ToolOp::Search, json!({"query": query})).await
    }

    async fn post(&self, op: ToolOp, body: Value) -> Result<Value, ToolError> {
        let backend = self.backend.as_ref().ok_or(ToolError::NotConfigured)?;
        let url = join_url(&backend.base_url, op.path());
        let request = http::client()
            .post(&url)
            .bearer_auth(&backend.api_key)
            .json(&body);
        Self::dispatch(op, request).await
    }

    async fn get(&self, op: ToolOp, query: &[(&str, &str)]) -> Result<Value, ToolError> {
        let backend = self.backend.as_ref().ok_or(ToolError::NotConfigured)?;
        let url = join_url(&backend.base_url, op.path());
        let request = http::client()
            .get(&url)
            .bearer_auth(&backend.api_key)
            .query(query);
        Self::dispatch(op, request).await
    }

    async fn dispatch(op: ToolOp, request: reqwest::RequestBuilder) -> Result<Value, ToolError> {
        let response = request.send().await.map_err(|err| {
            warn!(target: "tools", op = op.as_str(), error = %err, "tool request failed");
            ToolError::Transport {
                op: op.as_str(),
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                target: "tools",
                op = op.as_str(),
                status = status.as_u16(),
                "tool backend returned non-2xx"
            );
            return Err(ToolError::Status {
                op: op.as_str(),
                status: status.as_u16(),
                body,
            });
        }
        response.json::<Value>().await.map_err(|err| {
            warn!(target: "tools", op = op.as_str(), error = %err, "tool response unreadable");
            ToolError::Transport {
                op: op.as_str(),
                message: err.to_string(),
            }
        })
    }
}

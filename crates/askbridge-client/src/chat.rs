//! Chat-completion client.
//!
//! This client never returns an error: the page it feeds must always render,
//! so every failure degrades into a displayable string. The underlying cause
//! is logged, not propagated.

use serde_json::{json, Value};
use tracing::warn;

use crate::{http, join_url, Endpoint};

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 500;

const APOLOGY: &str = "Sorry, I ran into a problem reaching the assistant. Please try again.";

pub struct ChatClient {
    endpoint: Option<Endpoint>,
}

impl ChatClient {
    pub fn new(endpoint: Option<Endpoint>) -> Self {
        Self { endpoint }
    }

    /// Send a single-turn prompt and return the assistant's text.
    ///
    /// Non-200 statuses come back as a synthesized string embedding the
    /// status code; transport failures and malformed bodies come back as a
    /// generic apology.
    pub async fn complete(&self, prompt: &str) -> String {
        let Some(ref endpoint) = self.endpoint else {
            warn!(target: "chat", "chat endpoint not configured");
            return "The assistant is not configured on this deployment.".to_string();
        };
        let url = join_url(&endpoint.base_url, "/v1/chat/completions");
        let body = json!({
            "model": endpoint.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
            "stream": false,
        });

        let response = match http::client()
            .post(&url)
            .bearer_auth(&endpoint.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                warn!(target: "chat", error = %err, "chat request failed");
                return APOLOGY.to_string();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(target: "chat", status = status.as_u16(), "chat completion returned non-200");
            return format!(
                "The assistant is unavailable right now (status {}). Please try again.",
                status.as_u16()
            );
        }

        let payload: Value = match response.json().await {
            Ok(value) => value,
            Err(err) => {
                warn!(target: "chat", error = %err, "chat response body unreadable");
                return APOLOGY.to_string();
            }
        };
        match payload
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
        {
            Some(text) => text.to_string(),
            None => {
                warn!(target: "chat", "chat response missing choices[0].message.content");
                APOLOGY.to_string()
            }
        }
    }
}

//! Environment configuration, resolved once at startup.
//!
//! Missing required values are logged, not fatal: the service comes up in a
//! degraded mode where calls against the unconfigured provider fail at
//! request time with a visible error instead of a crash at boot.

use std::path::PathBuf;

use askbridge_client::{Backend, Endpoint};
use tracing::warn;

#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub inference: Option<Endpoint>,
    pub embedding: Option<Endpoint>,
    pub tools: Option<Backend>,
    pub app_api_key: Option<String>,
    pub bind: String,
    pub port: u16,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let inference = endpoint_from_env(
            "ASKBRIDGE_INFERENCE_URL",
            "ASKBRIDGE_INFERENCE_API_KEY",
            "ASKBRIDGE_INFERENCE_MODEL",
        );
        let embedding = endpoint_from_env(
            "ASKBRIDGE_EMBEDDING_URL",
            "ASKBRIDGE_EMBEDDING_API_KEY",
            "ASKBRIDGE_EMBEDDING_MODEL",
        );
        let tools = match (
            required_env("ASKBRIDGE_TOOLS_URL"),
            required_env("ASKBRIDGE_TOOLS_API_KEY"),
        ) {
            (Some(base_url), Some(api_key)) => Some(Backend { base_url, api_key }),
            _ => None,
        };
        let app_api_key = required_env("ASKBRIDGE_APP_API_KEY");
        let bind = std::env::var("ASKBRIDGE_BIND").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("ASKBRIDGE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8091);
        let upload_dir = std::env::var("ASKBRIDGE_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("askbridge-uploads"));

        Self {
            inference,
            embedding,
            tools,
            app_api_key,
            bind,
            port,
            upload_dir,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn required_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => {
            warn!(target: "config", %key, "required variable not set; dependent calls will fail");
            None
        }
    }
}

fn endpoint_from_env(url_key: &str, key_key: &str, model_key: &str) -> Option<Endpoint> {
    match (
        required_env(url_key),
        required_env(key_key),
        required_env(model_key),
    ) {
        (Some(base_url), Some(api_key), Some(model)) => Some(Endpoint {
            base_url,
            api_key,
            model,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env;

    #[test]
    fn partial_endpoint_config_yields_none_but_does_not_fail() {
        let mut guard = env::guard();
        guard.set("ASKBRIDGE_INFERENCE_URL", "https://inference.example");
        guard.remove("ASKBRIDGE_INFERENCE_API_KEY");
        guard.remove("ASKBRIDGE_INFERENCE_MODEL");
        guard.remove("ASKBRIDGE_EMBEDDING_URL");
        guard.remove("ASKBRIDGE_EMBEDDING_API_KEY");
        guard.remove("ASKBRIDGE_EMBEDDING_MODEL");
        guard.remove("ASKBRIDGE_TOOLS_URL");
        guard.remove("ASKBRIDGE_TOOLS_API_KEY");
        guard.remove("ASKBRIDGE_APP_API_KEY");
        let config = Config::from_env();
        assert!(config.inference.is_none());
        assert!(config.embedding.is_none());
        assert!(config.tools.is_none());
        assert!(config.app_api_key.is_none());
    }

    #[test]
    fn complete_config_resolves() {
        let mut guard = env::guard();
        guard.set("ASKBRIDGE_INFERENCE_URL", "https://inference.example");
        guard.set("ASKBRIDGE_INFERENCE_API_KEY", "ik");
        guard.set("ASKBRIDGE_INFERENCE_MODEL", "chat-1");
        guard.set("ASKBRIDGE_EMBEDDING_URL", "https://embed.example");
        guard.set("ASKBRIDGE_EMBEDDING_API_KEY", "ek");
        guard.set("ASKBRIDGE_EMBEDDING_MODEL", "embed-1");
        guard.set("ASKBRIDGE_TOOLS_URL", "https://tools.example");
        guard.set("ASKBRIDGE_TOOLS_API_KEY", "tk");
        guard.set("ASKBRIDGE_APP_API_KEY", "shared");
        guard.set("ASKBRIDGE_PORT", "9000");
        guard.remove("ASKBRIDGE_BIND");
        guard.remove("ASKBRIDGE_UPLOAD_DIR");
        let config = Config::from_env();
        assert_eq!(config.inference.as_ref().unwrap().model, "chat-1");
        assert_eq!(config.embedding.as_ref().unwrap().model, "embed-1");
        assert_eq!(config.tools.as_ref().unwrap().base_url, "https://tools.example");
        assert_eq!(config.app_api_key.as_deref(), Some("shared"));
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
    }
}

use once_cell::sync::OnceCell;
use std::time::Duration;

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn request_timeout() -> Duration {
    Duration::from_secs(env_u64("ASKBRIDGE_HTTP_TIMEOUT_SECS", 30).max(1))
}

fn connect_timeout() -> Duration {
    Duration::from_secs(env_u64("ASKBRIDGE_HTTP_CONNECT_TIMEOUT_SECS", 3).max(1))
}

fn user_agent() -> String {
    format!("askbridge/{}", env!("CARGO_PKG_VERSION"))
}

/// Shared client with harmonized defaults; all outbound provider calls go
/// through this.
pub(crate) fn client() -> &'static reqwest::Client {
    static CLIENT: OnceCell<reqwest::Client> = OnceCell::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .user_agent(user_agent())
            .connect_timeout(connect_timeout())
            .timeout(request_timeout())
            .build()
            .expect("http client")
    })
}

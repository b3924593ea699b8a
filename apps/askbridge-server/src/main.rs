use tower_http::trace::TraceLayer;
use tracing::info;

mod api_ask;
mod api_meta;
mod api_tools;
mod api_ui;
mod app_state;
mod config;
mod history;
mod openapi;
mod responses;
mod router;
mod security;
mod session;
#[cfg(test)]
mod test_support;
mod util;

pub(crate) use app_state::AppState;

const UPLOAD_LIMIT_BYTES: usize = 16 * 1024 * 1024;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = config::Config::from_env();
    std::fs::create_dir_all(&config.upload_dir)?;
    let addr = config.listen_addr();
    let state = AppState::new(config);

    let app = router::build_router()
        .with_state(state)
        .layer(axum::middleware::from_fn(security::headers_mw))
        .layer(TraceLayer::new_for_http())
        .layer(axum::extract::DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "askbridge listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
}

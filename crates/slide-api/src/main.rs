//! # slide-api — binary entry point
//!
//! Starts the Axum HTTP server. Configuration comes from the environment,
//! see [`slide_api::config`].

use anyhow::Context;
use slide_api::config::AppConfig;
use slide_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = slide_api::app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("landslide prediction API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

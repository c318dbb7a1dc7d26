//! # catalog-api: Binary Entry Point
//!
//! Loads `.env`, reads configuration from the environment, and serves the
//! catalog API on `0.0.0.0:$PORT` (default 5000).

use catalog_api::config::AppConfig;
use catalog_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::debug!(?config, "configuration loaded");

    let port = config.port;
    let state = AppState::from_config(config).map_err(|e| {
        tracing::error!("Mailer initialization failed: {e}");
        e
    })?;

    if let Err(e) = state.images.check().await {
        tracing::warn!("upload directory not ready: {e}");
    }

    let app = catalog_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Catalog API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

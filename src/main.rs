use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lingo_api::config::SessionAlgorithm;
use lingo_api::{routes, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SESSION_JWT_KEY, STRIPE_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lingo_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    tracing::info!(environment = ?config.environment, "Starting Lingo API");
    if config.is_production() && config.security.session_algorithm == SessionAlgorithm::Hs256 {
        tracing::warn!("Production is verifying sessions with a shared HS256 secret");
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config).context("building application state")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("Lingo API listening on http://{}", bind_addr);

    axum::serve(listener, routes::app(state)).await.context("server")?;

    Ok(())
}

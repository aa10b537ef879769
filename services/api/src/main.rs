use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::{info, warn};

use organizeja_api::config::{Config, StoreBackend};
use organizeja_api::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "organizeja_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    info!(environment = %config.environment, "loaded configuration");
    if config.store == StoreBackend::Memory {
        warn!("using the in-memory ledger store, data is lost on restart");
    }
    if config.verify_token.is_none() {
        warn!("WHATSAPP_VERIFY_TOKEN is not set, the webhook will answer 500");
    }

    let state = AppState::new(&config).await?;
    let app = organizeja_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

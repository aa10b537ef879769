pub mod command;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod reports;
pub mod store;
pub mod v1;
pub mod webhook;

use axum::{
    routing::{any, get},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::Config;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub verify_token: Option<String>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = store::connect(&config.store)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create ledger store: {}", e))?;

        Ok(Self::with_store(store, config.verify_token.clone()))
    }

    pub fn with_store(store: Arc<dyn LedgerStore>, verify_token: Option<String>) -> Self {
        Self {
            store,
            verify_token,
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "organizeja-api"
    }))
}

/// The whole HTTP surface: health check, chat webhook and the `/v1` ledger
/// API.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", any(webhook::dispatch))
        .nest("/v1", v1::router().layer(CorsLayer::permissive()))
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            ),
        )
        .with_state(state)
}

//! Chat-bot webhook: provider handshake plus text-command ingestion.
//!
//! All methods land on [`dispatch`], which applies the checks in a fixed
//! order: preflight, configured secret, handshake, delivery, then 405.

mod envelope;
mod outcome;
mod pipeline;

pub use envelope::{Delivery, InboundMessage};
pub use outcome::{Outcome, ALLOWED_HEADERS};
pub use pipeline::{ingest, record, resolve_account};

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::Method,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HandshakeQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl HandshakeQuery {
    /// A subscription handshake needs `hub.mode=subscribe` and a token.
    fn is_subscription(&self) -> bool {
        self.mode.as_deref() == Some("subscribe")
            && self.verify_token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    query: Option<Query<HandshakeQuery>>,
    body: Result<Bytes, BytesRejection>,
) -> Outcome {
    info!(%method, "webhook request");

    if method == Method::OPTIONS {
        return Outcome::Preflight;
    }

    let Some(secret) = state.verify_token.as_deref() else {
        error!("WHATSAPP_VERIFY_TOKEN is not configured, refusing webhook traffic");
        return Outcome::SecretMissing;
    };

    let query = query.map(|Query(query)| query).unwrap_or_default();
    if method == Method::GET && query.is_subscription() {
        return verify(query, secret);
    }

    if method == Method::POST {
        return match body {
            Ok(body) => receive(state, body).await,
            Err(err) => {
                error!(error = %err, "unreadable webhook body");
                Outcome::InternalError
            }
        };
    }

    warn!(%method, "unsupported webhook request");
    Outcome::MethodNotAllowed
}

fn verify(query: HandshakeQuery, secret: &str) -> Outcome {
    if query.verify_token.as_deref() == Some(secret) {
        info!("webhook handshake accepted");
        Outcome::HandshakeAccepted {
            challenge: query.challenge.unwrap_or_default(),
        }
    } else {
        warn!("webhook handshake with wrong verify token");
        Outcome::HandshakeRejected
    }
}

async fn receive(state: AppState, body: Bytes) -> Outcome {
    let message = match envelope::parse(&body) {
        Ok(Delivery::Text(message)) => message,
        Ok(Delivery::NotText) => {
            info!("delivery without a text message");
            return Outcome::NotText;
        }
        Ok(Delivery::Incomplete) => {
            info!("text message without sender or body");
            return Outcome::InvalidData;
        }
        Err(err) => {
            error!(error = %err, "unreadable webhook payload");
            return Outcome::InternalError;
        }
    };

    // A panic inside the pipeline must still be acknowledged with 200.
    match tokio::spawn(ingest(state.store.clone(), message)).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(error = %err, "webhook pipeline aborted");
            Outcome::InternalError
        }
    }
}

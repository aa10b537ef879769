use axum::{
    extract::{Path, State},
    Json,
};
use postgres_models::{Account, NewAccount};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{errors::AppResult, extractors::CurrentAccount, AppState};

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub full_name: Option<String>,
}

pub async fn show(CurrentAccount(account): CurrentAccount) -> Json<Account> {
    Json(account)
}

/// Creates the profile on first use; afterwards only the name changes.
pub async fn upsert(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Json(request): Json<UpsertProfileRequest>,
) -> AppResult<Json<Account>> {
    let full_name = request
        .full_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let account = state
        .store
        .upsert_profile(NewAccount {
            id: account_id,
            full_name,
        })
        .await?;
    info!(%account_id, "profile saved");

    Ok(Json(account))
}

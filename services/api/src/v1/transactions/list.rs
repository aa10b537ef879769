use axum::{extract::State, Json};
use postgres_models::Transaction;

use crate::{errors::AppResult, extractors::CurrentAccount, AppState};

/// Newest first.
pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> AppResult<Json<Vec<Transaction>>> {
    let transactions = state.store.list_transactions(account.id).await?;
    Ok(Json(transactions))
}

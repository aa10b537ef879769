use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    extractors::CurrentAccount,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct TransactionPath {
    pub transaction_id: Uuid,
}

pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(TransactionPath { transaction_id }): Path<TransactionPath>,
) -> AppResult<StatusCode> {
    if !state.store.delete_transaction(account.id, transaction_id).await? {
        return Err(AppError::not_found(format!(
            "Transaction {transaction_id} not found"
        )));
    }
    info!(account_id = %account.id, %transaction_id, "transaction deleted");

    Ok(StatusCode::NO_CONTENT)
}

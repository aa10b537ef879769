use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use super::BudgetPath;
use crate::{
    errors::{AppError, AppResult},
    extractors::CurrentAccount,
    AppState,
};

pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(BudgetPath { budget_id }): Path<BudgetPath>,
) -> AppResult<StatusCode> {
    if !state.store.delete_budget(account.id, budget_id).await? {
        return Err(AppError::not_found(format!("Budget {budget_id} not found")));
    }
    info!(account_id = %account.id, %budget_id, "budget deleted");

    Ok(StatusCode::NO_CONTENT)
}

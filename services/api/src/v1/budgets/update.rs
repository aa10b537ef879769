use axum::{
    extract::{Path, State},
    Json,
};
use postgres_models::Budget;
use tracing::info;

use super::{BudgetPath, BudgetRequest};
use crate::{
    errors::{AppError, AppResult},
    extractors::CurrentAccount,
    AppState,
};

pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(BudgetPath { budget_id }): Path<BudgetPath>,
    Json(request): Json<BudgetRequest>,
) -> AppResult<Json<Budget>> {
    let changes = request.into_changes()?;
    let budget = state
        .store
        .update_budget(account.id, budget_id, changes)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Budget {budget_id} not found")))?;
    info!(account_id = %account.id, %budget_id, "budget updated");

    Ok(Json(budget))
}

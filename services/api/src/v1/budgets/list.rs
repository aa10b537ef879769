use axum::{extract::State, Json};

use crate::{
    errors::AppResult,
    extractors::CurrentAccount,
    reports::{budget_progress, BudgetProgress},
    AppState,
};

/// Budgets with how much of each has been spent so far.
pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> AppResult<Json<Vec<BudgetProgress>>> {
    let budgets = state.store.list_budgets(account.id).await?;
    let transactions = state.store.list_transactions(account.id).await?;

    let progress = budgets
        .iter()
        .map(|budget| budget_progress(budget, &transactions))
        .collect();
    Ok(Json(progress))
}

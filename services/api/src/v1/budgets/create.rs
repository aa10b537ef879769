use axum::{extract::State, http::StatusCode, Json};
use postgres_models::{Budget, NewBudget};
use tracing::info;

use super::BudgetRequest;
use crate::{errors::AppResult, extractors::CurrentAccount, AppState};

pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<BudgetRequest>,
) -> AppResult<(StatusCode, Json<Budget>)> {
    let changes = request.into_changes()?;
    let budget = state
        .store
        .insert_budget(NewBudget::new(account.id, changes))
        .await?;
    info!(account_id = %account.id, budget_id = %budget.id, category = %budget.category, "budget created");

    Ok((StatusCode::CREATED, Json(budget)))
}

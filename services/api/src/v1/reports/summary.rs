use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    errors::AppResult,
    extractors::CurrentAccount,
    reports::{self, CategoryTotal, MonthTotals, Totals},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub totals: Totals,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotals>,
}

pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> AppResult<Json<SummaryResponse>> {
    let transactions = state.store.list_transactions(account.id).await?;

    Ok(Json(SummaryResponse {
        totals: reports::totals(&transactions),
        by_category: reports::expenses_by_category(&transactions),
        by_month: reports::monthly_totals(&transactions),
    }))
}

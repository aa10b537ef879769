use axum::{
    routing::{get, put},
    Router,
};
use chrono::{Datelike, NaiveDate};
use postgres_models::BudgetChanges;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

mod create;
mod delete;
mod list;
mod update;

pub fn router() -> Router<crate::AppState> {
    Router::new()
        .route(
            "/accounts/:account_id/budgets",
            get(list::handler).post(create::handler),
        )
        .route(
            "/accounts/:account_id/budgets/:budget_id",
            put(update::handler).delete(delete::handler),
        )
}

#[derive(Debug, Deserialize)]
pub struct BudgetPath {
    pub budget_id: Uuid,
}

/// Body shared by create and update.
#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub category: String,
    pub amount: f64,
    /// `YYYY-MM`; a full `YYYY-MM-DD` is accepted and moved to the 1st.
    pub month: String,
}

impl BudgetRequest {
    pub fn into_changes(self) -> AppResult<BudgetChanges> {
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(AppError::bad_request("Category cannot be empty"));
        }
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return Err(AppError::bad_request("Amount must be a positive number"));
        }
        let month = parse_month(&self.month).ok_or_else(|| {
            AppError::bad_request(format!("Invalid month {:?}, expected YYYY-MM", self.month))
        })?;

        Ok(BudgetChanges {
            category,
            amount: self.amount,
            month,
        })
    }
}

pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = if raw.len() == 7 {
        NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()?
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?
    };
    date.with_day(1)
}

use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, NaiveTime};
use postgres_models::{NewTransaction, Transaction, TransactionKind};
use serde::Deserialize;
use tracing::info;

use crate::{
    command::parse_amount,
    errors::{AppError, AppResult},
    extractors::CurrentAccount,
    AppState,
};

/// Amounts typed into a form arrive as strings ("10,50"); API clients may
/// send plain numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| n.is_finite() && *n > 0.0),
            Self::Text(s) => parse_amount(s.trim()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub kind: TransactionKind,
    pub amount: AmountInput,
    pub description: String,
    pub category: Option<String>,
    /// Defaults to now. A picked date is stored at midnight UTC.
    pub occurred_on: Option<NaiveDate>,
}

/// Record a transaction from the interactive UI. Unlike the chat path, the
/// user may choose the date.
pub async fn handler(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let amount = request
        .amount
        .value()
        .ok_or_else(|| AppError::bad_request("Amount must be a positive number"))?;

    let description = request.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::bad_request("Description cannot be empty"));
    }
    let category = request
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let mut new_transaction =
        NewTransaction::new(account.id, request.kind, amount, description, category);
    if let Some(date) = request.occurred_on {
        new_transaction = new_transaction.occurred_at(date.and_time(NaiveTime::MIN).and_utc());
    }

    let transaction = state.store.insert_transaction(new_transaction).await?;
    info!(
        account_id = %account.id,
        transaction_id = %transaction.id,
        kind = %transaction.kind,
        "transaction created"
    );

    Ok((StatusCode::CREATED, Json(transaction)))
}

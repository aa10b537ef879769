use axum::{extract::State, Json};
use postgres_models::Account;
use serde::Deserialize;
use tracing::info;

use crate::{
    errors::{AppError, AppResult},
    extractors::CurrentAccount,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LinkPhoneRequest {
    pub phone_number: String,
}

/// Normalizes a phone for linking: every non-digit (`+`, spaces, dashes,
/// parentheses) is dropped and what remains must be 12 or 13 digits (country
/// code, area code, subscriber number), the form the chat provider reports
/// senders in.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (12..=13).contains(&digits.len()).then_some(digits)
}

pub async fn link(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(request): Json<LinkPhoneRequest>,
) -> AppResult<Json<Account>> {
    let phone_number = normalize_phone(&request.phone_number).ok_or_else(|| {
        AppError::bad_request("Phone number must be 12 or 13 digits, e.g. 5511987654321")
    })?;

    let account = state
        .store
        .set_phone_number(account.id, Some(phone_number))
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {} not found", account.id)))?;
    info!(account_id = %account.id, "phone number linked");

    Ok(Json(account))
}

pub async fn unlink(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> AppResult<Json<Account>> {
    let account = state
        .store
        .set_phone_number(account.id, None)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Account {} not found", account.id)))?;
    info!(account_id = %account.id, "phone number unlinked");

    Ok(Json(account))
}

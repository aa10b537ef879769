use crate::errors::AppError;
use crate::AppState;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};
use postgres_models::Account;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
struct AccountPath {
    account_id: Uuid,
}

/// The account named by the `:account_id` path segment. Rejects with 400 for
/// a malformed id and 404 for an unknown one.
pub struct CurrentAccount(pub Account);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(AccountPath { account_id }) = Path::<AccountPath>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let app_state = AppState::from_ref(state);
        let account = app_state
            .store
            .find_account(account_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {account_id} not found")))?;

        Ok(CurrentAccount(account))
    }
}

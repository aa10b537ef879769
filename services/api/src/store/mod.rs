//! Persistence seam for the ledger.
//!
//! Handlers and the webhook pipeline only talk to [`LedgerStore`]. The
//! production backend is [`PgLedgerStore`]; [`MemoryLedgerStore`] keeps the
//! same tables in process for local runs and tests.

mod memory;
mod postgres;

pub use memory::MemoryLedgerStore;
pub use postgres::PgLedgerStore;

use async_trait::async_trait;
use postgres_models::{
    Account, Budget, BudgetChanges, DbError, NewAccount, NewBudget, NewTransaction, Transaction,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::StoreBackend;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Conflict(String),

    #[error("account {0} does not exist")]
    UnknownAccount(Uuid),

    #[error(transparent)]
    Database(#[from] DbError),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub const PHONE_ALREADY_LINKED: &str = "Phone number is already linked to another account";

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>>;

    /// Accounts whose linked phone is exactly `phone_number`, capped at
    /// `limit` so callers can detect duplicates without loading them all.
    async fn account_ids_by_phone(&self, phone_number: &str, limit: usize) -> StoreResult<Vec<Uuid>>;

    async fn upsert_profile(&self, new_account: NewAccount) -> StoreResult<Account>;

    /// `None` unlinks. Fails with [`StoreError::Conflict`] when another
    /// account already owns the number.
    async fn set_phone_number(
        &self,
        account_id: Uuid,
        phone_number: Option<String>,
    ) -> StoreResult<Option<Account>>;

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> StoreResult<Transaction>;

    /// Newest `occurred_at` first.
    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<Transaction>>;

    async fn delete_transaction(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool>;

    async fn insert_budget(&self, new_budget: NewBudget) -> StoreResult<Budget>;

    /// Newest month first, then by category.
    async fn list_budgets(&self, account_id: Uuid) -> StoreResult<Vec<Budget>>;

    async fn update_budget(
        &self,
        account_id: Uuid,
        id: Uuid,
        changes: BudgetChanges,
    ) -> StoreResult<Option<Budget>>;

    async fn delete_budget(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool>;
}

pub async fn connect(backend: &StoreBackend) -> StoreResult<Arc<dyn LedgerStore>> {
    match backend {
        StoreBackend::Postgres { database_url } => {
            let store = PgLedgerStore::connect(database_url).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryLedgerStore::new())),
    }
}

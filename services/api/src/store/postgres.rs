use async_trait::async_trait;
use postgres_models::{
    Account, Budget, BudgetChanges, DbConnection, DbError, DbPool, NewAccount, NewBudget,
    NewTransaction, Transaction,
};
use uuid::Uuid;

use super::{LedgerStore, StoreError, StoreResult, PHONE_ALREADY_LINKED};

#[derive(Clone)]
pub struct PgLedgerStore {
    pool: DbPool,
}

impl PgLedgerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let pool = postgres_models::create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    async fn conn(&self) -> Result<DbConnection, DbError> {
        Ok(self.pool.get_owned().await?)
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let mut conn = self.conn().await?;
        Ok(Account::find(&mut conn, id).await?)
    }

    async fn account_ids_by_phone(&self, phone_number: &str, limit: usize) -> StoreResult<Vec<Uuid>> {
        let mut conn = self.conn().await?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(Account::ids_by_phone(&mut conn, phone_number, limit).await?)
    }

    async fn upsert_profile(&self, new_account: NewAccount) -> StoreResult<Account> {
        let mut conn = self.conn().await?;
        Ok(Account::upsert_profile(&mut conn, &new_account).await?)
    }

    async fn set_phone_number(
        &self,
        account_id: Uuid,
        phone_number: Option<String>,
    ) -> StoreResult<Option<Account>> {
        let mut conn = self.conn().await?;
        match Account::set_phone_number(&mut conn, account_id, phone_number.as_deref()).await {
            Ok(account) => Ok(account),
            Err(err) if err.is_unique_violation() => {
                Err(StoreError::Conflict(PHONE_ALREADY_LINKED.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> StoreResult<Transaction> {
        let mut conn = self.conn().await?;
        match Transaction::insert(&mut conn, &new_transaction).await {
            Ok(transaction) => Ok(transaction),
            Err(err) if err.is_foreign_key_violation() => {
                Err(StoreError::UnknownAccount(new_transaction.account_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<Transaction>> {
        let mut conn = self.conn().await?;
        Ok(Transaction::list_for_account(&mut conn, account_id).await?)
    }

    async fn delete_transaction(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn().await?;
        Ok(Transaction::delete(&mut conn, account_id, id).await? > 0)
    }

    async fn insert_budget(&self, new_budget: NewBudget) -> StoreResult<Budget> {
        let mut conn = self.conn().await?;
        match Budget::insert(&mut conn, &new_budget).await {
            Ok(budget) => Ok(budget),
            Err(err) if err.is_foreign_key_violation() => {
                Err(StoreError::UnknownAccount(new_budget.account_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list_budgets(&self, account_id: Uuid) -> StoreResult<Vec<Budget>> {
        let mut conn = self.conn().await?;
        Ok(Budget::list_for_account(&mut conn, account_id).await?)
    }

    async fn update_budget(
        &self,
        account_id: Uuid,
        id: Uuid,
        changes: BudgetChanges,
    ) -> StoreResult<Option<Budget>> {
        let mut conn = self.conn().await?;
        Ok(Budget::update(&mut conn, account_id, id, &changes).await?)
    }

    async fn delete_budget(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut conn = self.conn().await?;
        Ok(Budget::delete(&mut conn, account_id, id).await? > 0)
    }
}

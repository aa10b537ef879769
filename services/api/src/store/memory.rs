use async_trait::async_trait;
use chrono::Utc;
use postgres_models::{
    Account, Budget, BudgetChanges, NewAccount, NewBudget, NewTransaction, Transaction,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LedgerStore, StoreError, StoreResult, PHONE_ALREADY_LINKED};

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

/// In-process ledger with the same constraints as the Postgres schema:
/// unique phone numbers and rows that must reference an existing account.
#[derive(Default)]
pub struct MemoryLedgerStore {
    tables: RwLock<Tables>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn has_account(&self, id: Uuid) -> bool {
        self.accounts.iter().any(|account| account.id == id)
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.iter().find(|account| account.id == id).cloned())
    }

    async fn account_ids_by_phone(&self, phone_number: &str, limit: usize) -> StoreResult<Vec<Uuid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .iter()
            .filter(|account| account.phone_number.as_deref() == Some(phone_number))
            .map(|account| account.id)
            .take(limit)
            .collect())
    }

    async fn upsert_profile(&self, new_account: NewAccount) -> StoreResult<Account> {
        let mut tables = self.tables.write().await;
        if let Some(account) = tables.accounts.iter_mut().find(|a| a.id == new_account.id) {
            account.full_name = new_account.full_name;
            return Ok(account.clone());
        }

        let account = Account {
            id: new_account.id,
            full_name: new_account.full_name,
            phone_number: None,
            created_at: Utc::now(),
        };
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn set_phone_number(
        &self,
        account_id: Uuid,
        phone_number: Option<String>,
    ) -> StoreResult<Option<Account>> {
        let mut tables = self.tables.write().await;
        if let Some(phone) = phone_number.as_deref() {
            let taken = tables
                .accounts
                .iter()
                .any(|a| a.id != account_id && a.phone_number.as_deref() == Some(phone));
            if taken {
                return Err(StoreError::Conflict(PHONE_ALREADY_LINKED.to_string()));
            }
        }

        Ok(tables
            .accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .map(|account| {
                account.phone_number = phone_number;
                account.clone()
            }))
    }

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> StoreResult<Transaction> {
        let mut tables = self.tables.write().await;
        if !tables.has_account(new_transaction.account_id) {
            return Err(StoreError::UnknownAccount(new_transaction.account_id));
        }

        let transaction = Transaction {
            id: new_transaction.id,
            account_id: new_transaction.account_id,
            kind: new_transaction.kind,
            amount: new_transaction.amount,
            description: new_transaction.description,
            category: new_transaction.category,
            occurred_at: new_transaction.occurred_at,
            created_at: Utc::now(),
        };
        tables.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn list_transactions(&self, account_id: Uuid) -> StoreResult<Vec<Transaction>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|tx| tx.account_id == account_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(rows)
    }

    async fn delete_transaction(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.transactions.len();
        tables
            .transactions
            .retain(|tx| !(tx.id == id && tx.account_id == account_id));
        Ok(tables.transactions.len() < before)
    }

    async fn insert_budget(&self, new_budget: NewBudget) -> StoreResult<Budget> {
        let mut tables = self.tables.write().await;
        if !tables.has_account(new_budget.account_id) {
            return Err(StoreError::UnknownAccount(new_budget.account_id));
        }

        let budget = Budget {
            id: new_budget.id,
            account_id: new_budget.account_id,
            category: new_budget.category,
            amount: new_budget.amount,
            month: new_budget.month,
            created_at: Utc::now(),
        };
        tables.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn list_budgets(&self, account_id: Uuid) -> StoreResult<Vec<Budget>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Budget> = tables
            .budgets
            .iter()
            .filter(|budget| budget.account_id == account_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.category.cmp(&b.category)));
        Ok(rows)
    }

    async fn update_budget(
        &self,
        account_id: Uuid,
        id: Uuid,
        changes: BudgetChanges,
    ) -> StoreResult<Option<Budget>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .budgets
            .iter_mut()
            .find(|budget| budget.id == id && budget.account_id == account_id)
            .map(|budget| {
                budget.category = changes.category;
                budget.amount = changes.amount;
                budget.month = changes.month;
                budget.clone()
            }))
    }

    async fn delete_budget(&self, account_id: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.budgets.len();
        tables
            .budgets
            .retain(|budget| !(budget.id == id && budget.account_id == account_id));
        Ok(tables.budgets.len() < before)
    }
}

use crate::schema::transactions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::DbError;

pub const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind.parse().ok()
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == Some(TransactionKind::Expense)
    }

    pub fn is_income(&self) -> bool {
        self.kind() == Some(TransactionKind::Income)
    }

    pub async fn insert(
        conn: &mut AsyncPgConnection,
        new_transaction: &NewTransaction,
    ) -> Result<Self, DbError> {
        let transaction = diesel::insert_into(transactions::table)
            .values(new_transaction)
            .returning(Transaction::as_returning())
            .get_result(conn)
            .await?;
        Ok(transaction)
    }

    /// Newest first.
    pub async fn list_for_account(
        conn: &mut AsyncPgConnection,
        account_id: Uuid,
    ) -> Result<Vec<Self>, DbError> {
        let rows = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .order(transactions::occurred_at.desc())
            .select(Transaction::as_select())
            .load(conn)
            .await?;
        Ok(rows)
    }

    /// Returns the number of deleted rows (0 or 1).
    pub async fn delete(
        conn: &mut AsyncPgConnection,
        account_id: Uuid,
        id: Uuid,
    ) -> Result<usize, DbError> {
        let deleted = diesel::delete(
            transactions::table
                .filter(transactions::id.eq(id))
                .filter(transactions::account_id.eq(account_id)),
        )
        .execute(conn)
        .await?;
        Ok(deleted)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub kind: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub occurred_at: DateTime<Utc>,
}

impl NewTransaction {
    /// A transaction dated now. `category` falls back to [`DEFAULT_CATEGORY`].
    pub fn new(
        account_id: Uuid,
        kind: TransactionKind,
        amount: f64,
        description: String,
        category: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            kind: kind.as_str().to_string(),
            amount,
            description,
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            occurred_at: Utc::now(),
        }
    }

    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for TransactionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

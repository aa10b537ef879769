use crate::schema::budgets;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DbError;

/// Spending cap for one category over one calendar month. `month` is always
/// the first day of that month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = budgets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Budget {
    pub id: Uuid,
    pub account_id: Uuid,
    pub category: String,
    pub amount: f64,
    pub month: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = budgets)]
pub struct NewBudget {
    pub id: Uuid,
    pub account_id: Uuid,
    pub category: String,
    pub amount: f64,
    pub month: NaiveDate,
}

impl NewBudget {
    pub fn new(account_id: Uuid, changes: BudgetChanges) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            category: changes.category,
            amount: changes.amount,
            month: changes.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = budgets)]
pub struct BudgetChanges {
    pub category: String,
    pub amount: f64,
    pub month: NaiveDate,
}

impl Budget {
    pub async fn insert(conn: &mut AsyncPgConnection, new_budget: &NewBudget) -> Result<Self, DbError> {
        let budget = diesel::insert_into(budgets::table)
            .values(new_budget)
            .returning(Budget::as_returning())
            .get_result(conn)
            .await?;
        Ok(budget)
    }

    /// Most recent month first.
    pub async fn list_for_account(
        conn: &mut AsyncPgConnection,
        account_id: Uuid,
    ) -> Result<Vec<Self>, DbError> {
        let rows = budgets::table
            .filter(budgets::account_id.eq(account_id))
            .order((budgets::month.desc(), budgets::category.asc()))
            .select(Budget::as_select())
            .load(conn)
            .await?;
        Ok(rows)
    }

    pub async fn update(
        conn: &mut AsyncPgConnection,
        account_id: Uuid,
        id: Uuid,
        changes: &BudgetChanges,
    ) -> Result<Option<Self>, DbError> {
        let budget = diesel::update(
            budgets::table
                .filter(budgets::id.eq(id))
                .filter(budgets::account_id.eq(account_id)),
        )
        .set(changes)
        .returning(Budget::as_returning())
        .get_result(conn)
        .await
        .optional()?;
        Ok(budget)
    }

    pub async fn delete(
        conn: &mut AsyncPgConnection,
        account_id: Uuid,
        id: Uuid,
    ) -> Result<usize, DbError> {
        let deleted = diesel::delete(
            budgets::table
                .filter(budgets::id.eq(id))
                .filter(budgets::account_id.eq(account_id)),
        )
        .execute(conn)
        .await?;
        Ok(deleted)
    }
}

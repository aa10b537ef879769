use crate::schema::profiles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DbError;

/// A registered user. The phone number is what the chat webhook uses to find
/// the owner of an inbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = profiles)]
pub struct NewAccount {
    pub id: Uuid,
    pub full_name: Option<String>,
}

impl Account {
    pub async fn find(conn: &mut AsyncPgConnection, id: Uuid) -> Result<Option<Self>, DbError> {
        let account = profiles::table
            .find(id)
            .select(Account::as_select())
            .first(conn)
            .await
            .optional()?;
        Ok(account)
    }

    /// Ids of the profiles linked to `phone_number`, at most `limit` of them.
    pub async fn ids_by_phone(
        conn: &mut AsyncPgConnection,
        phone_number: &str,
        limit: i64,
    ) -> Result<Vec<Uuid>, DbError> {
        let ids = profiles::table
            .filter(profiles::phone_number.eq(phone_number))
            .select(profiles::id)
            .limit(limit)
            .load(conn)
            .await?;
        Ok(ids)
    }

    pub async fn upsert_profile(
        conn: &mut AsyncPgConnection,
        new_account: &NewAccount,
    ) -> Result<Self, DbError> {
        let account = diesel::insert_into(profiles::table)
            .values(new_account)
            .on_conflict(profiles::id)
            .do_update()
            .set(profiles::full_name.eq(&new_account.full_name))
            .returning(Account::as_returning())
            .get_result(conn)
            .await?;
        Ok(account)
    }

    /// Links (`Some`) or unlinks (`None`) a phone number. Returns `None` when
    /// the profile does not exist.
    pub async fn set_phone_number(
        conn: &mut AsyncPgConnection,
        id: Uuid,
        phone_number: Option<&str>,
    ) -> Result<Option<Self>, DbError> {
        let account = diesel::update(profiles::table.find(id))
            .set(profiles::phone_number.eq(phone_number))
            .returning(Account::as_returning())
            .get_result(conn)
            .await
            .optional()?;
        Ok(account)
    }
}

//! Diesel row structs. Internal to the persistence layer; repositories
//! convert them to domain types before returning.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{expenses, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// `created_at` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = expenses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExpenseRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount_cents: i64,
    pub spent_on: NaiveDate,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = expenses)]
pub(crate) struct NewExpenseRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: &'a str,
    pub amount_cents: i64,
    pub spent_on: NaiveDate,
}

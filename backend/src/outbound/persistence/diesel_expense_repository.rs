//! PostgreSQL-backed `ExpenseRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ExpenseRepository, ExpenseRepositoryError};
use crate::domain::{Amount, Description, Expense, ExpenseId, UserId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{ExpenseRow, NewExpenseRow};
use super::pool::{DbPool, PoolError};
use super::schema::expenses;

/// Diesel implementation of [`ExpenseRepository`].
#[derive(Clone)]
pub struct DieselExpenseRepository {
    pool: DbPool,
}

impl DieselExpenseRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExpenseRepositoryError {
    ExpenseRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> ExpenseRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => ExpenseRepositoryError::connection(message),
        DieselFailure::Query(message) => ExpenseRepositoryError::query(message),
        DieselFailure::UniqueViolation { .. } => {
            ExpenseRepositoryError::query("expense identifier collision")
        }
    }
}

fn row_to_expense(row: ExpenseRow) -> Result<Expense, ExpenseRepositoryError> {
    let corrupt = |err: crate::domain::ExpenseValidationError| {
        warn!(expense_id = %row.id, error = %err, "stored expense fails validation");
        ExpenseRepositoryError::query("stored expense is invalid")
    };
    let description = Description::new(&row.description).map_err(corrupt)?;
    let amount = Amount::new(row.amount_cents).map_err(corrupt)?;
    Ok(Expense::new(
        ExpenseId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        description,
        amount,
        row.spent_on,
    ))
}

#[async_trait]
impl ExpenseRepository for DieselExpenseRepository {
    async fn create(&self, expense: &Expense) -> Result<(), ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewExpenseRow {
            id: *expense.id().as_uuid(),
            user_id: *expense.user_id().as_uuid(),
            description: expense.description().as_str(),
            amount_cents: expense.amount().cents(),
            spent_on: expense.date(),
        };

        diesel::insert_into(expenses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert expense"))
    }

    async fn find_for_user(
        &self,
        user_id: &UserId,
        expense_id: &ExpenseId,
    ) -> Result<Option<Expense>, ExpenseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        expenses::table
            .filter(expenses::id.eq(*expense_id.as_uuid()))
            .filter(expenses::user_id.eq(*user_id.as_uuid()))
            .select(ExpenseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "select expense"))?
            .map(row_to_expense)
            .transpose()
    }
}

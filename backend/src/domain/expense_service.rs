//! Expense use cases: record an expense and fetch one back.
//!
//! Both handlers are scoped to a single user. Fetching an expense that
//! belongs to somebody else is indistinguishable from fetching one that does
//! not exist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    ExpenseRepository, ExpenseRepositoryError, Handler, UserPersistenceError, UserRepository,
};
use crate::domain::validation::expense_error;
use crate::domain::{
    AddExpenseCommand, Amount, Description, Error, Expense, ExpenseId, GetExpenseQuery, UserId,
};

/// Expense service implementing the add and get handlers.
#[derive(Clone)]
pub struct ExpenseService<U, E> {
    users: Arc<U>,
    expenses: Arc<E>,
}

impl<U, E> ExpenseService<U, E> {
    /// Create a new service from its collaborators.
    pub const fn new(users: Arc<U>, expenses: Arc<E>) -> Self {
        Self { users, expenses }
    }
}

fn map_expense_store_error(err: &ExpenseRepositoryError) -> Error {
    error!(error = %err, "expense persistence failed");
    Error::internal("expense persistence failed")
}

impl<U, E> ExpenseService<U, E>
where
    U: UserRepository,
    E: ExpenseRepository,
{
    async fn ensure_user_exists(&self, user_id: &UserId) -> Result<(), Error> {
        match self.users.find_by_id(user_id).await {
            Ok(_) => Ok(()),
            Err(UserPersistenceError::NotFound { .. }) => {
                Err(Error::not_found(format!("user {user_id} not found")))
            }
            Err(err) => {
                error!(error = %err, %user_id, "user lookup failed");
                Err(Error::internal("user lookup failed"))
            }
        }
    }
}

#[async_trait]
impl<U, E> Handler<AddExpenseCommand, Expense> for ExpenseService<U, E>
where
    U: UserRepository,
    E: ExpenseRepository,
{
    async fn handle(&self, command: AddExpenseCommand) -> Result<Expense, Error> {
        let description =
            Description::new(&command.description).map_err(|err| expense_error(&err))?;
        let amount = Amount::new(command.amount_cents).map_err(|err| expense_error(&err))?;
        self.ensure_user_exists(&command.user_id).await?;

        let expense = Expense::new(
            ExpenseId::random(),
            command.user_id,
            description,
            amount,
            command.date,
        );
        self.expenses
            .create(&expense)
            .await
            .map_err(|err| map_expense_store_error(&err))?;

        info!(user_id = %command.user_id, expense_id = %expense.id(), "expense recorded");
        Ok(expense)
    }
}

#[async_trait]
impl<U, E> Handler<GetExpenseQuery, Expense> for ExpenseService<U, E>
where
    U: UserRepository,
    E: ExpenseRepository,
{
    async fn handle(&self, query: GetExpenseQuery) -> Result<Expense, Error> {
        self.expenses
            .find_for_user(&query.user_id, &query.expense_id)
            .await
            .map_err(|err| map_expense_store_error(&err))?
            .ok_or_else(|| Error::not_found(format!("expense {} not found", query.expense_id)))
    }
}

#[cfg(test)]
#[path = "expense_service_tests.rs"]
mod tests;

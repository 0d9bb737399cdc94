//! Port for expense persistence.

use async_trait::async_trait;

use crate::domain::{Expense, ExpenseId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by expense repository adapters.
    pub enum ExpenseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "expense repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "expense repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Persist a new expense.
    async fn create(&self, expense: &Expense) -> Result<(), ExpenseRepositoryError>;

    /// Fetch an expense only if it belongs to `user_id`.
    async fn find_for_user(
        &self,
        user_id: &UserId,
        expense_id: &ExpenseId,
    ) -> Result<Option<Expense>, ExpenseRepositoryError>;
}

//! In-process repositories used when no database is configured and by the
//! integration tests.
//!
//! Each repository guards its maps with a single mutex. The guard is never
//! held across an `.await`, and the username uniqueness check and insert
//! happen under the same guard.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ExpenseRepository, ExpenseRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{Expense, ExpenseId, User, UserId, Username};

#[derive(Default)]
struct UserTables {
    by_id: HashMap<UserId, User>,
    id_by_username: HashMap<String, UserId>,
}

/// Mutex-guarded [`UserRepository`].
#[derive(Default)]
pub struct InMemoryUserRepository {
    tables: Mutex<UserTables>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserTables>, UserPersistenceError> {
        self.tables
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock()?;
        let username = user.username().as_str();
        if tables.id_by_username.contains_key(username) {
            return Err(UserPersistenceError::username_conflict(username));
        }
        if tables.by_id.contains_key(user.id()) {
            return Err(UserPersistenceError::query("user id already present"));
        }
        tables.id_by_username.insert(username.to_owned(), *user.id());
        tables.by_id.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> Result<User, UserPersistenceError> {
        let tables = self.lock()?;
        tables
            .id_by_username
            .get(username.as_str())
            .and_then(|id| tables.by_id.get(id))
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(username.as_str()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        self.lock()?
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))
    }
}

/// Mutex-guarded [`ExpenseRepository`].
#[derive(Default)]
pub struct InMemoryExpenseRepository {
    expenses: Mutex<HashMap<ExpenseId, Expense>>,
}

impl InMemoryExpenseRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ExpenseId, Expense>>, ExpenseRepositoryError> {
        self.expenses
            .lock()
            .map_err(|_| ExpenseRepositoryError::query("expense store lock poisoned"))
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn create(&self, expense: &Expense) -> Result<(), ExpenseRepositoryError> {
        let mut expenses = self.lock()?;
        if expenses.contains_key(expense.id()) {
            return Err(ExpenseRepositoryError::query("expense id already present"));
        }
        expenses.insert(*expense.id(), expense.clone());
        Ok(())
    }

    async fn find_for_user(
        &self,
        user_id: &UserId,
        expense_id: &ExpenseId,
    ) -> Result<Option<Expense>, ExpenseRepositoryError> {
        Ok(self
            .lock()?
            .get(expense_id)
            .filter(|expense| expense.user_id() == user_id)
            .cloned())
    }
}

//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// A user with this username already exists.
        UsernameConflict { username: String } => "username already exists: {username}",
        /// No user matches the lookup key.
        NotFound { key: String } => "user not found: {key}",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// User store contract.
///
/// `create` must make the uniqueness check and the insert one atomic step:
/// of two concurrent creates with the same username exactly one succeeds and
/// the other observes [`UserPersistenceError::UsernameConflict`]. Existing
/// rows are never overwritten.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by username, failing with `NotFound` when absent.
    async fn find_by_username(&self, username: &Username) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier, failing with `NotFound` when absent.
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserPersistenceError>;
}

//! PostgreSQL-backed `UserRepository`.
//!
//! Uniqueness of usernames is enforced by the `users_username_key` index, so
//! concurrent inserts race inside PostgreSQL and the loser surfaces as a
//! unique violation. No check-then-insert happens in application code.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, Username};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &str,
    username: Option<&Username>,
) -> UserPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation { constraint } => {
            let on_username = constraint
                .as_deref()
                .is_none_or(|name| name.contains("username"));
            match username {
                Some(username) if on_username => {
                    UserPersistenceError::username_conflict(username.as_str())
                }
                _ => {
                    warn!(?constraint, %operation, "unexpected unique violation");
                    UserPersistenceError::query("unique constraint violated")
                }
            }
        }
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

/// Rebuild a domain user from a stored row.
///
/// Rows are written only through [`DieselUserRepository::create`], so a
/// row failing validation means the table was edited by hand.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored username fails validation");
        UserPersistenceError::query("stored username is invalid")
    })?;
    let password_hash = PasswordHash::new(row.password_hash).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored password hash is empty");
        UserPersistenceError::query("stored password hash is invalid")
    })?;
    Ok(User::new(UserId::from_uuid(row.id), username, password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_str(),
            password_hash: user.password_hash().as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert user", Some(user.username())))
    }

    async fn find_by_username(&self, username: &Username) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "select user by username", None))?
            .ok_or_else(|| UserPersistenceError::not_found(username.as_str()))?;
        row_to_user(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "select user by id", None))?
            .ok_or_else(|| UserPersistenceError::not_found(id.to_string()))?;
        row_to_user(row)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and error mapping; query execution is covered by
    //! `tests/diesel_user_repository.rs` against embedded PostgreSQL.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[derive(Debug)]
    struct UniqueInfo(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for UniqueInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> diesel::result::Error {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new(UniqueInfo(constraint)),
        )
    }

    fn row(username: &str, hash: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            password_hash: hash.to_owned(),
        }
    }

    #[rstest]
    fn row_to_user_preserves_fields() {
        let stored = row("alice", "$argon2id$v=19$stub");
        let id = stored.id;
        let user = row_to_user(stored).expect("valid row");
        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.username().as_str(), "alice");
        assert_eq!(user.password_hash().as_str(), "$argon2id$v=19$stub");
    }

    #[rstest]
    #[case("x", "$argon2id$stub")]
    #[case("alice", "  ")]
    fn row_to_user_rejects_corrupt_rows(#[case] username: &str, #[case] hash: &str) {
        let err = row_to_user(row(username, hash)).expect_err("corrupt row");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    #[case(Some("users_username_key"), true)]
    #[case(None, true)]
    #[case(Some("users_pkey"), false)]
    fn unique_violations_map_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] is_conflict: bool,
    ) {
        let username = Username::new("alice").expect("valid username");
        let err = map_diesel_error(unique_violation(constraint), "insert user", Some(&username));
        assert_eq!(
            matches!(err, UserPersistenceError::UsernameConflict { .. }),
            is_conflict
        );
    }

    #[rstest]
    fn not_found_during_lookup_is_a_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound, "select", None);
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}

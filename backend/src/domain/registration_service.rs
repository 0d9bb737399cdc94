//! Registration use case: validate, hash, persist, issue a token.
//!
//! Failure translation:
//! - value-object validation → `InvalidRequest`
//! - store reports a taken username → `UsernameConflict`, passed through as is
//! - anything else (hashing, storage, token issuance) → `InternalError`
//!
//! If token issuance fails after the insert, the account stays in place and
//! the caller gets `InternalError`. Logging in with the same credentials
//! recovers a token; no compensating delete is attempted.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    Handler, PasswordHasher, TokenIssuer, UserPersistenceError, UserRepository,
};
use crate::domain::validation::{password_error, username_error};
use crate::domain::{
    AuthResult, Error, Password, RegisterUserCommand, User, UserId, Username,
};

/// Registration service implementing `Handler<RegisterUserCommand, AuthResult>`.
#[derive(Clone)]
pub struct RegistrationService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> RegistrationService<U, H, T> {
    /// Create a new service from its collaborators.
    pub const fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> RegistrationService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenIssuer,
{
    async fn build_user(&self, command: &RegisterUserCommand) -> Result<User, Error> {
        let username = Username::new(command.username()).map_err(|err| username_error(&err))?;
        let password = Password::new(command.password()).map_err(|err| password_error(&err))?;

        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| {
                error!(error = %err, "password hashing task did not complete");
                Error::internal("password hashing failed")
            })?
            .map_err(|err| {
                error!(error = %err, "password hashing failed");
                Error::internal("password hashing failed")
            })?;

        Ok(User::new(UserId::random(), username, password_hash))
    }

    async fn persist(&self, user: &User) -> Result<(), Error> {
        match self.users.create(user).await {
            Ok(()) => Ok(()),
            Err(UserPersistenceError::UsernameConflict { username }) => {
                debug!(%username, "registration rejected: username taken");
                Err(Error::username_conflict("username is already taken")
                    .with_details(json!({ "field": "username", "code": "username_taken" })))
            }
            Err(err) => {
                error!(error = %err, "user persistence failed during registration");
                Err(Error::internal("user persistence failed"))
            }
        }
    }
}

#[async_trait]
impl<U, H, T> Handler<RegisterUserCommand, AuthResult> for RegistrationService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenIssuer,
{
    async fn handle(&self, command: RegisterUserCommand) -> Result<AuthResult, Error> {
        let user = self.build_user(&command).await?;
        self.persist(&user).await?;

        let token = self.tokens.issue(user.id()).map_err(|err| {
            error!(
                user_id = %user.id(),
                error = %err,
                "user persisted but token issuance failed"
            );
            Error::internal("token issuance failed")
        })?;

        info!(user_id = %user.id(), "user registered");
        Ok(AuthResult::new(*user.id(), user.username().clone(), token))
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;

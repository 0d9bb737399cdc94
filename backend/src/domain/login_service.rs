//! Login use case: look up, verify, issue a token.
//!
//! An unknown username and a wrong password produce the same
//! `InvalidCredentials` error so callers cannot probe for accounts. Both
//! paths also pay for one hash verification: a missing account is checked
//! against a decoy hash derived once per service with the live hasher, so
//! response time does not reveal whether the username exists. Blank input is
//! rejected up front as `InvalidRequest`; any other malformed username cannot
//! belong to an account and is reported as `InvalidCredentials`.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::ports::{
    Handler, PasswordHashError, PasswordHasher, TokenIssuer, UserPersistenceError,
    UserRepository,
};
use crate::domain::validation::{password_error, username_error};
use crate::domain::{
    AuthResult, Error, LoginQuery, Password, PasswordHash, User, UserValidationError, Username,
};

const DECOY_PASSWORD: &str = "decoy-credential-for-unknown-accounts";

/// Login service implementing `Handler<LoginQuery, AuthResult>`.
#[derive(Clone)]
pub struct LoginService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    decoy: OnceLock<PasswordHash>,
}

impl<U, H, T> LoginService<U, H, T> {
    /// Create a new service from its collaborators.
    pub const fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy: OnceLock::new(),
        }
    }
}

fn parse_query(query: &LoginQuery) -> Result<(Username, Password), Error> {
    let password = Password::new(query.password()).map_err(|err| password_error(&err))?;
    let username = match Username::new(query.username()) {
        Ok(username) => username,
        Err(err @ UserValidationError::EmptyUsername) => return Err(username_error(&err)),
        Err(_) => {
            debug!("login rejected");
            return Err(Error::invalid_credentials());
        }
    };
    Ok((username, password))
}

impl<U, H, T> LoginService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenIssuer,
{
    /// Hash of a fixed password with the live hasher's cost, derived on
    /// first use. Every login waits for it, so the one-off cost lands on
    /// known and unknown usernames alike.
    async fn decoy_hash(&self) -> Result<PasswordHash, Error> {
        if let Some(hash) = self.decoy.get() {
            return Ok(hash.clone());
        }
        let hasher = Arc::clone(&self.hasher);
        let hash = tokio::task::spawn_blocking(move || {
            let password = Password::new(DECOY_PASSWORD)
                .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
            hasher.hash(&password)
        })
        .await
        .map_err(|err| {
            error!(error = %err, "decoy hashing task did not complete");
            Error::internal("password verification failed")
        })?
        .map_err(|err| {
            error!(error = %err, "decoy hashing failed");
            Error::internal("password verification failed")
        })?;
        Ok(self.decoy.get_or_init(|| hash).clone())
    }

    async fn lookup(&self, username: &Username) -> Result<Option<User>, Error> {
        match self.users.find_by_username(username).await {
            Ok(user) => Ok(Some(user)),
            Err(UserPersistenceError::NotFound { .. }) => Ok(None),
            Err(err) => {
                error!(error = %err, "user lookup failed during login");
                Err(Error::internal("user lookup failed"))
            }
        }
    }

    async fn verify(&self, password: Password, stored: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|err| {
                error!(error = %err, "password verification task did not complete");
                Error::internal("password verification failed")
            })
    }
}

#[async_trait]
impl<U, H, T> Handler<LoginQuery, AuthResult> for LoginService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenIssuer,
{
    async fn handle(&self, query: LoginQuery) -> Result<AuthResult, Error> {
        let (username, password) = parse_query(&query)?;
        let decoy = self.decoy_hash().await?;
        let user = self.lookup(&username).await?;
        let stored = user
            .as_ref()
            .map_or(decoy, |found| found.password_hash().clone());
        let matches = self.verify(password, stored).await?;

        let Some(user) = user.filter(|_| matches) else {
            debug!("login rejected");
            return Err(Error::invalid_credentials());
        };

        let token = self.tokens.issue(user.id()).map_err(|err| {
            error!(user_id = %user.id(), error = %err, "token issuance failed during login");
            Error::internal("token issuance failed")
        })?;

        info!(user_id = %user.id(), "user logged in");
        Ok(AuthResult::new(*user.id(), user.username().clone(), token))
    }
}

#[cfg(test)]
#[path = "login_service_tests.rs"]
mod tests;

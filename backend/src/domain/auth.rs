//! Authentication commands, queries and results.
//!
//! The command and query values carry raw caller input. Domain validation
//! happens inside the use cases so that every transport gets the same
//! invariants regardless of its own request parsing.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{UserId, Username};

/// Maximum accepted password length in characters.
pub const PASSWORD_MAX: usize = 128;

/// Domain error returned when a plaintext password is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    #[error("password must not be empty")]
    Empty,
    #[error("password must be at most {max} characters")]
    TooLong { max: usize },
}

/// Plaintext password held only for the duration of a request.
///
/// The buffer is zeroed on drop and `Debug` output is redacted. Whitespace is
/// preserved to avoid surprising credential comparisons.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and wrap a plaintext password.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.is_empty() {
            return Err(PasswordValidationError::Empty);
        }
        if raw.chars().count() > PASSWORD_MAX {
            return Err(PasswordValidationError::TooLong { max: PASSWORD_MAX });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Expose the plaintext for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command: create a new account.
///
/// # Examples
/// ```
/// use finance_backend::domain::RegisterUserCommand;
///
/// let command = RegisterUserCommand::new("alice", "pw1");
/// assert_eq!(command.username(), "alice");
/// ```
#[derive(Clone)]
pub struct RegisterUserCommand {
    username: String,
    password: Zeroizing<String>,
}

impl RegisterUserCommand {
    /// Capture raw registration input.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Requested username, as supplied.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Requested password, as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Query: authenticate an existing account.
#[derive(Clone)]
pub struct LoginQuery {
    username: String,
    password: Zeroizing<String>,
}

impl LoginQuery {
    /// Capture raw login input.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username, as supplied.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password, as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginQuery")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Signed session token plus its expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Encoded token suitable for an `Authorization: Bearer` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Instant after which verifiers reject the token.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Successful registration or login.
///
/// Transient: built by the use case, handed to the transport, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    user_id: UserId,
    username: Username,
    token: AccessToken,
}

impl AuthResult {
    /// Assemble a result from its parts.
    #[must_use]
    pub const fn new(user_id: UserId, username: Username, token: AccessToken) -> Self {
        Self {
            user_id,
            username,
            token,
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }
}

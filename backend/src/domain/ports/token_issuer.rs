//! Ports for issuing and verifying signed session tokens.
//!
//! Issuing is a use-case concern; verifying is a transport concern (bearer
//! authentication on protected routes). Splitting the two keeps transports
//! unable to mint tokens.

#[cfg(test)]
use mockall::automock;

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Signing or encoding the token failed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, has a bad signature, or a foreign issuer.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token was valid but its expiry has passed.
        Expired => "token has expired",
    }
}

/// Produces signed, time-bounded credentials asserting a user identity.
#[cfg_attr(test, automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token whose subject is `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenError>;
}

/// Validates tokens produced by a [`TokenIssuer`].
#[cfg_attr(test, automock)]
pub trait TokenVerifier: Send + Sync {
    /// Return the subject of a valid, unexpired token.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}

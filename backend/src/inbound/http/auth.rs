//! Bearer-token authentication for protected REST routes.
//!
//! [`AuthenticatedUser`] is an extractor: handlers that take it only run for
//! requests carrying `Authorization: Bearer <token>` with a valid, unexpired
//! token. Missing or bad tokens yield `401`.

use std::future::{Ready, ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use tracing::{debug, error};

use crate::domain::ports::TokenError;
use crate::domain::{Error, UserId};
use crate::inbound::UseCases;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity proven by the request's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub const fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Allow the call only when it addresses the caller's own resources.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when `owner` is another user.
    pub fn require_owner(&self, owner: &UserId) -> Result<(), Error> {
        if &self.0 == owner {
            Ok(())
        } else {
            debug!(caller = %self.0, %owner, "cross-user access rejected");
            Err(Error::forbidden("token does not grant access to this user"))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))
}

/// Map a verifier failure to the client-facing error.
pub(crate) fn token_rejection(err: &TokenError) -> Error {
    debug!(error = %err, "bearer token rejected");
    match err {
        TokenError::Expired => Error::unauthorized("token has expired"),
        TokenError::Invalid { .. } | TokenError::Signing { .. } => {
            Error::unauthorized("invalid bearer token")
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let token = bearer_token(req)?;
    let Some(use_cases) = req.app_data::<web::Data<UseCases>>() else {
        error!("use cases are not registered as app data");
        return Err(Error::internal("authentication is not configured"));
    };
    use_cases
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|err| token_rejection(&err))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

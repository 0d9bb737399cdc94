//! HS256 JWT implementation of the `TokenIssuer` and `TokenVerifier` ports.
//!
//! Claims carry `sub` (user id), `iss`, `iat` and `exp`. Expiry is checked
//! against the injected clock rather than the system time, so tests can
//! move time forward deterministically.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer, TokenVerifier};
use crate::domain::{AccessToken, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Build an issuer. `secret` should be at least 32 random bytes.
    #[must_use]
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        ttl: TimeDelta,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl,
            clock,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["sub", "iss", "exp"]);
        validation.validate_exp = false;
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at: DateTime<Utc> = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::signing("token lifetime overflows the calendar"))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(AccessToken::new(value, expires_at))
    }
}

impl TokenVerifier for JwtTokenIssuer {
    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::expired());
        }
        UserId::new(&data.claims.sub).map_err(|err| TokenError::invalid(err.to_string()))
    }
}

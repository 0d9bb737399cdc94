//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `FINANCE_*` environment variables and an
//! optional config file, in that order of precedence. Every field is
//! optional; accessors supply the defaults.

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWT_ISSUER: &str = "localhost";
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// Shortest accepted HS256 secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Invalid configuration detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("jwt secret must be at least {min} bytes")]
    JwtSecretTooShort { min: usize },
    #[error("token ttl of {seconds} seconds is out of range")]
    TokenTtl { seconds: u64 },
}

/// Runtime configuration for the finance backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FINANCE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, data lives in process memory.
    pub database_url: Option<String>,
    /// HMAC secret for signing tokens.
    pub jwt_secret: Option<String>,
    /// Permit a random per-process secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// `iss` claim written to and required from tokens.
    pub jwt_issuer: Option<String>,
    pub token_ttl_seconds: Option<u64>,
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Configured signing secret, if any, checked for minimum length.
    pub fn jwt_secret(&self) -> Result<Option<&[u8]>, SettingsError> {
        match self.jwt_secret.as_deref() {
            None => Ok(None),
            Some(secret) if secret.len() < MIN_JWT_SECRET_LEN => {
                Err(SettingsError::JwtSecretTooShort {
                    min: MIN_JWT_SECRET_LEN,
                })
            }
            Some(secret) => Ok(Some(secret.as_bytes())),
        }
    }

    pub fn jwt_issuer(&self) -> &str {
        self.jwt_issuer.as_deref().unwrap_or(DEFAULT_JWT_ISSUER)
    }

    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let seconds = self.token_ttl_seconds.unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);
        i64::try_from(seconds)
            .ok()
            .filter(|value| *value > 0)
            .and_then(TimeDelta::try_seconds)
            .ok_or(SettingsError::TokenTtl { seconds })
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

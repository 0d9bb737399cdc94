//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use chrono::TimeDelta;
use finance_backend::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Token signing parameters resolved from settings.
pub struct TokenConfig {
    pub(crate) secret: Zeroizing<Vec<u8>>,
    pub(crate) issuer: String,
    pub(crate) ttl: TimeDelta,
}

impl TokenConfig {
    #[must_use]
    pub fn new(secret: Zeroizing<Vec<u8>>, issuer: impl Into<String>, ttl: TimeDelta) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            ttl,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: TokenConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: TokenConfig) -> Self {
        Self {
            bind_addr,
            tokens,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, users and expenses are stored in PostgreSQL instead of
    /// process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

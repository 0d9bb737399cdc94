//! Backend entry-point: loads settings, wires adapters and serves REST,
//! GraphQL and OpenAPI docs.

mod server;

use std::time::Duration;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use finance_backend::inbound::http::health::HealthState;
use finance_backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use finance_backend::settings::{AppSettings, MIN_JWT_SECRET_LEN};
use server::{ServerConfig, TokenConfig, create_server};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Resolve the signing secret, falling back to a random per-process key in
/// debug builds or when explicitly allowed.
fn resolve_jwt_secret(settings: &AppSettings) -> std::io::Result<Zeroizing<Vec<u8>>> {
    if let Some(secret) = settings
        .jwt_secret()
        .map_err(|err| startup_error("invalid jwt secret", err))?
    {
        return Ok(Zeroizing::new(secret.to_vec()));
    }

    if cfg!(debug_assertions) || settings.allow_ephemeral_secret {
        warn!("using ephemeral jwt secret; tokens will not survive a restart");
        let mut secret = Zeroizing::new(vec![0_u8; MIN_JWT_SECRET_LEN]);
        getrandom::getrandom(secret.as_mut_slice())
            .map_err(|err| startup_error("failed to generate jwt secret", err))?;
        Ok(secret)
    } else {
        Err(std::io::Error::other(
            "FINANCE_JWT_SECRET is required in release builds",
        ))
    }
}

async fn build_server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("invalid bind address", err))?;
    let ttl = settings
        .token_ttl()
        .map_err(|err| startup_error("invalid token ttl", err))?;
    let tokens = TokenConfig::new(resolve_jwt_secret(settings)?, settings.jwt_issuer(), ttl);
    let config = ServerConfig::new(bind_addr, tokens);

    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };

    apply_migrations(database_url)
        .await
        .map_err(|err| startup_error("database migration failed", err))?;
    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.db_max_connections())
            .with_connection_timeout(Duration::from_secs(5)),
    )
    .await
    .map_err(|err| startup_error("database pool setup failed", err))?;
    info!("database pool ready");
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("failed to load settings", err))?;
    let config = build_server_config(&settings).await?;
    let bind_addr = config.bind_addr;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}

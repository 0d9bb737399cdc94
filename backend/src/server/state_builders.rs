//! Builders wiring driven adapters into the shared use-case bundle.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use finance_backend::domain::ports::{ExpenseRepository, UserRepository};
use finance_backend::inbound::UseCases;
use finance_backend::outbound::hashing::Argon2PasswordHasher;
use finance_backend::outbound::memory::{InMemoryExpenseRepository, InMemoryUserRepository};
use finance_backend::outbound::persistence::{DieselExpenseRepository, DieselUserRepository};
use finance_backend::outbound::tokens::JwtTokenIssuer;

use super::config::TokenConfig;
use super::ServerConfig;

fn build_token_issuer(tokens: &TokenConfig) -> Arc<JwtTokenIssuer> {
    Arc::new(JwtTokenIssuer::new(
        &tokens.secret,
        tokens.issuer.clone(),
        tokens.ttl,
        Arc::new(DefaultClock),
    ))
}

fn wire<U, E>(users: U, expenses: E, tokens: &TokenConfig) -> UseCases
where
    U: UserRepository + 'static,
    E: ExpenseRepository + 'static,
{
    UseCases::new(
        Arc::new(users),
        Arc::new(expenses),
        Arc::new(Argon2PasswordHasher::new()),
        build_token_issuer(tokens),
    )
}

/// Build the use cases, backed by PostgreSQL when a pool is configured and
/// by process memory otherwise.
pub(crate) fn build_use_cases(config: &ServerConfig) -> UseCases {
    match &config.db_pool {
        Some(pool) => wire(
            DieselUserRepository::new(pool.clone()),
            DieselExpenseRepository::new(pool.clone()),
            &config.tokens,
        ),
        None => {
            info!("no database configured; using in-memory stores");
            wire(
                InMemoryUserRepository::new(),
                InMemoryExpenseRepository::new(),
                &config.tokens,
            )
        }
    }
}

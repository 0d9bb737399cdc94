//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so the wiring here uses the
//! public API only: in-memory stores, cheap Argon2 parameters and a JWT
//! issuer on the system clock.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::DefaultClock;

use finance_backend::inbound::UseCases;
use finance_backend::outbound::hashing::Argon2PasswordHasher;
use finance_backend::outbound::memory::{InMemoryExpenseRepository, InMemoryUserRepository};
use finance_backend::outbound::tokens::JwtTokenIssuer;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-of-32-bytes-or-more";
pub const TEST_ISSUER: &str = "finance-integration";

/// Use cases over fresh in-memory stores.
pub fn in_memory_use_cases() -> UseCases {
    let hasher = Argon2PasswordHasher::with_params(1024, 1, 1).expect("argon2 params");
    let tokens = JwtTokenIssuer::new(
        TEST_SECRET,
        TEST_ISSUER,
        TimeDelta::hours(1),
        Arc::new(DefaultClock),
    );
    UseCases::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryExpenseRepository::new()),
        Arc::new(hasher),
        Arc::new(tokens),
    )
}

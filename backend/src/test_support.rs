//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::domain::ports::TokenIssuer;
use crate::domain::UserId;
use crate::inbound::UseCases;
use crate::outbound::hashing::Argon2PasswordHasher;
use crate::outbound::memory::{InMemoryExpenseRepository, InMemoryUserRepository};
use crate::outbound::tokens::JwtTokenIssuer;

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

pub fn fixture_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single() {
        Some(now) => now,
        None => panic!("fixture timestamp"),
    }
}

const TOKEN_TTL_SECONDS: i64 = 3600;
const SECRET: &[u8] = b"unit-test-secret-with-at-least-32-bytes";

/// In-memory use cases with cheap hashing and a controllable clock.
pub struct TestHarness {
    clock: Arc<MutableClock>,
    tokens: Arc<JwtTokenIssuer>,
    use_cases: web::Data<UseCases>,
}

impl TestHarness {
    pub fn use_cases(&self) -> web::Data<UseCases> {
        self.use_cases.clone()
    }

    pub fn token_for(&self, user_id: &UserId) -> String {
        match self.tokens.issue(user_id) {
            Ok(token) => token.as_str().to_owned(),
            Err(err) => panic!("token issuance failed: {err}"),
        }
    }

    pub fn advance_clock_seconds(&self, seconds: i64) {
        self.clock.advance_seconds(seconds);
    }

    pub const fn token_ttl_seconds(&self) -> i64 {
        TOKEN_TTL_SECONDS
    }
}

#[fixture]
pub fn harness() -> TestHarness {
    let clock = Arc::new(MutableClock::new(fixture_now()));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    let tokens = Arc::new(JwtTokenIssuer::new(
        SECRET,
        "finance-test",
        TimeDelta::seconds(TOKEN_TTL_SECONDS),
        dyn_clock,
    ));
    let hasher = match Argon2PasswordHasher::with_params(1024, 1, 1) {
        Ok(hasher) => Arc::new(hasher),
        Err(err) => panic!("argon2 params: {err}"),
    };
    let use_cases = UseCases::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryExpenseRepository::new()),
        hasher,
        Arc::clone(&tokens),
    );
    TestHarness {
        clock,
        tokens,
        use_cases: web::Data::new(use_cases),
    }
}

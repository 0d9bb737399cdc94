//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving port: [`Handler`], implemented by every use case.
//! Driven ports: [`PasswordHasher`], [`TokenIssuer`], [`TokenVerifier`],
//! [`UserRepository`] and [`ExpenseRepository`], implemented under
//! `crate::outbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod expense_repository;
mod handler;
mod password_hasher;
mod token_issuer;
mod user_repository;

#[cfg(test)]
pub use expense_repository::MockExpenseRepository;
pub use expense_repository::{ExpenseRepository, ExpenseRepositoryError};
pub use handler::Handler;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_issuer::{MockTokenIssuer, MockTokenVerifier};
pub use token_issuer::{TokenError, TokenIssuer, TokenVerifier};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

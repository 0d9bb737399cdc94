//! Outbound adapters implementing the driven ports.
//!
//! - `hashing`: Argon2id credential hasher
//! - `tokens`: HS256 JWT issuer and verifier
//! - `persistence`: PostgreSQL repositories on Diesel
//! - `memory`: mutex-guarded in-process repositories
//!
//! Adapters translate between domain types and infrastructure
//! representations and carry no business rules.

pub mod hashing;
pub mod memory;
pub mod persistence;
pub mod tokens;

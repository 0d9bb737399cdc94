//! Port for one-way password hashing and verification.

#[cfg(test)]
use mockall::automock;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hasher adapters.
    pub enum PasswordHashError {
        /// The hashing primitive failed (parameters, entropy source, output).
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Credential hasher contract.
///
/// `hash` must salt every credential independently so equal passwords never
/// share a hash. `verify` must compare in constant time and treat a
/// malformed stored hash as a mismatch.
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a storable hash from a plaintext password.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool;
}

//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so a
//! stored hash keeps verifying after the configured cost changes.

use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use password_hash::{PasswordHash as PhcString, SaltString};
use tracing::debug;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

const SALT_LEN: usize = 16;

/// Argon2id credential hasher with per-hash random salts.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Argon2PasswordHasher {
    /// Hasher with the library's recommended cost (19 MiB, 2 passes, 1 lane).
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Hasher with explicit cost parameters.
    ///
    /// Low costs are only sensible in tests.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when Argon2 rejects the
    /// combination (for example memory below eight blocks per lane).
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn fresh_salt() -> Result<SaltString, PasswordHashError> {
    let mut bytes = [0_u8; SALT_LEN];
    getrandom::getrandom(&mut bytes).map_err(|err| PasswordHashError::hashing(err.to_string()))?;
    SaltString::encode_b64(&bytes).map_err(|err| PasswordHashError::hashing(err.to_string()))
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let salt = fresh_salt()?;
        let phc = self
            .argon2()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .to_string();
        PasswordHash::new(phc).map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        let Ok(parsed) = PhcString::new(hash.as_str()) else {
            debug!("stored password hash is not a PHC string");
            return false;
        };
        self.argon2()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok()
    }
}

//! Password hashing.
//!
//! Uses Argon2id for password hashing. Hashes are stored as PHC strings, so
//! verification always uses the salt and parameters embedded in the hash.

use std::sync::{Arc, OnceLock};

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

use crate::config::AuthConfig;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Argon2 parameters were rejected.
    #[error("invalid argon2 parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),
}

/// One-way password hasher.
///
/// Clones share the lazily built dummy hash used by [`verify_dummy`](Self::verify_dummy).
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
    dummy_hash: Arc<OnceLock<Option<String>>>,
}

impl CredentialHasher {
    /// Create a hasher with explicit Argon2 cost parameters.
    pub fn new(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self::with_params(params))
    }

    fn with_params(params: Params) -> Self {
        Self {
            params,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Create a hasher from the `[auth]` configuration section.
    pub fn from_config(config: &AuthConfig) -> Result<Self, PasswordError> {
        Self::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
        )
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        )
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Returns a PHC-formatted string that carries the salt and parameters.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch, or a stored value that is not a PHC string, is `false`.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!("Stored password hash is not a valid PHC string: {}", e);
                return false;
            }
        };

        // Parameters come from the parsed hash, not from self.params
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend the same work as a real verification without a stored hash.
    ///
    /// Called on login for unknown usernames so response time does not reveal
    /// whether the account exists. The dummy hash is built with this hasher's
    /// own parameters.
    pub fn verify_dummy(&self, password: &str) {
        if let Some(hash) = self.dummy_hash() {
            let _ = self.verify(password, hash);
        }
    }

    fn dummy_hash(&self) -> Option<&str> {
        self.dummy_hash
            .get_or_init(|| self.hash("dummy-password-never-matches").ok())
            .as_deref()
    }
}

impl Default for CredentialHasher {
    /// Memory 64 MB, 3 iterations, 4 lanes.
    fn default() -> Self {
        Self::with_params(Params::new(65536, 3, 4, None).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(1024, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hasher().hash("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=1024"));
        assert!(hash.contains("t=1"));
        assert!(hash.contains("p=1"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let hash1 = hasher.hash("same_password").unwrap();
        let hash2 = hasher.hash("same_password").unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_correct() {
        let hasher = hasher();
        let hash = hasher.hash("correct_password").unwrap();

        assert!(hasher.verify("correct_password", &hash));
    }

    #[test]
    fn test_verify_wrong() {
        let hasher = hasher();
        let hash = hasher.hash("correct_password").unwrap();

        assert!(!hasher.verify("wrong_password", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_verify_invalid_hash_is_false() {
        assert!(!hasher().verify("any_password", "not_a_valid_hash"));
        assert!(!hasher().verify("any_password", ""));
    }

    #[test]
    fn test_verify_uses_embedded_params() {
        let hash = CredentialHasher::new(2048, 2, 1)
            .unwrap()
            .hash("portable")
            .unwrap();

        assert!(hasher().verify("portable", &hash));
    }

    #[test]
    fn test_unicode_and_special_chars() {
        let hasher = hasher();
        for password in ["パスワード123", "p@$$w0rd!#$%^&*()"] {
            let hash = hasher.hash(password).unwrap();
            assert!(hasher.verify(password, &hash));
        }
    }

    #[test]
    fn test_verify_dummy_does_not_panic() {
        hasher().verify_dummy("whatever");
    }

    #[test]
    fn test_dummy_hash_follows_own_params() {
        let cheap = hasher();
        let costly = CredentialHasher::new(2048, 2, 1).unwrap();

        cheap.verify_dummy("whatever");
        costly.verify_dummy("whatever");

        assert!(cheap.dummy_hash().unwrap().contains("m=1024,t=1,p=1"));
        assert!(costly.dummy_hash().unwrap().contains("m=2048,t=2,p=1"));

        // Clones reuse the hash instead of building another
        let clone = costly.clone();
        assert!(std::ptr::eq(
            clone.dummy_hash().unwrap(),
            costly.dummy_hash().unwrap()
        ));
    }

    #[test]
    fn test_invalid_params() {
        let result = CredentialHasher::new(1024, 1, 0);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }

    #[test]
    fn test_default_params() {
        let hash = CredentialHasher::default().hash("default_cost").unwrap();
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }
}

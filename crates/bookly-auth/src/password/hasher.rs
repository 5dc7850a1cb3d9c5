//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::debug;

use bookly_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    ///
    /// Two calls with the same input produce different encodings.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `false` for a mismatch and for a malformed stored hash; a
    /// corrupt hash is a failed login, not a server error.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new();
        let h1 = hasher.hash_password("hunter42").unwrap();
        let h2 = hasher.hash_password("hunter42").unwrap();
        assert_ne!(h1, h2);
        assert!(hasher.verify_password("hunter42", &h1));
        assert!(hasher.verify_password("hunter42", &h2));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct").unwrap();
        assert!(!hasher.verify_password("incorrect", &hash));
    }

    #[test]
    fn test_malformed_hash_is_false_not_error() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("anything", "not-a-phc-string"));
        assert!(!hasher.verify_password("anything", ""));
    }
}

//! Argon2id password hashing in PHC string format.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Failures from the hashing primitives.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing itself failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The stored value is not a parseable PHC string.
    #[error("stored password hash is malformed")]
    Malformed,

    /// Verification failed for a reason other than a mismatch.
    #[error("password verification failed: {0}")]
    Verify(String),
}

/// Hashes `password` with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks `password` against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only parse or backend failures are errors.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::Malformed)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_a_salted_phc_string() {
        let first = hash_password("espresso!").unwrap();
        let second = hash_password("espresso!").unwrap();
        assert!(first.starts_with("$argon2id$"));
        // Fresh salt per call.
        assert_ne!(first, second);
    }

    #[test]
    fn verify_accepts_the_right_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_the_wrong_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_mismatch() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-hash"),
            Err(PasswordError::Malformed)
        ));
    }
}

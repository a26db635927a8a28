// Password hashing and verification

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::auth::error::AuthError;

/// Password service wrapping Argon2id
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Verify a password against a stored PHC-format hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = PasswordService::hash_password("hunter2hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordService::verify_password("hunter2hunter2", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hash = PasswordService::hash_password("correct horse").unwrap();
        assert!(!PasswordService::verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let a = PasswordService::hash_password("password123").unwrap();
        let b = PasswordService::hash_password("password123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = PasswordService::verify_password("anything", "not-a-phc-hash");
        assert!(matches!(result, Err(AuthError::PasswordHash)));
    }
}

// src/domain/user/password.rs
//
// Salted password hashing. Only PHC strings are ever stored.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::domain::{DomainError, DomainResult};

pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DomainError::Credentials(e.to_string()))?
        .to_string();
    Ok(password_hash)
}

/// Constant-time comparison against a stored hash.
/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("Secret123").unwrap();
        let second = hash_password("Secret123").unwrap();
        assert_ne!(first, second);
        assert!(!first.contains("Secret123"));
    }

    #[test]
    fn test_verify() {
        let hash = hash_password("Secret123").unwrap();
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
        assert!(!verify_password("Secret123", "not-a-hash"));
    }
}

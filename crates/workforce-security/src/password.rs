//! Password hashing with Argon2
//!
//! New hashes are Argon2 PHC strings. Verification also accepts bcrypt hashes
//! (`$2a$`, `$2b$`, `$2y$`) for accounts imported from older stores.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if is_bcrypt(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::HashError(e.to_string()));
        }
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

fn is_bcrypt(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"].iter().any(|prefix| hash.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_never_equals_plaintext() {
        let hash = PasswordService::hash("password123").unwrap();
        assert_ne!(hash, "password123");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = PasswordService::hash("password123").unwrap();
        let b = PasswordService::hash("password123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_matches_only_the_hashed_password() {
        let hash = PasswordService::hash("password123").unwrap();
        assert!(PasswordService::verify("password123", &hash).unwrap());
        assert!(!PasswordService::verify("password124", &hash).unwrap());
    }

    #[test]
    fn verifies_imported_bcrypt_hashes() {
        let legacy = bcrypt::hash("password123", 4).unwrap();
        assert!(PasswordService::verify("password123", &legacy).unwrap());
        assert!(!PasswordService::verify("wrong-pass", &legacy).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(PasswordService::verify("password123", "plain-text").is_err());
    }
}

// ============================
// gatekeeper-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use zeroize::Zeroize;

use crate::error::AppError;

const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;
const SCRYPT_OUTPUT_LEN: usize = 32;

/// Salted scrypt hasher with a fixed cost
#[derive(Clone, Debug)]
pub struct Hasher {
    params: Params,
}

impl Hasher {
    /// Create a hasher with cost `2^log_n`
    pub fn new(log_n: u8) -> Result<Self, AppError> {
        let params = Params::new(log_n, SCRYPT_R, SCRYPT_P, SCRYPT_OUTPUT_LEN)
            .map_err(|e| AppError::PasswordHash(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hash a password into a PHC string with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params.clone(), &salt)?
            .to_string();
        Ok(hash)
    }

    /// Hash a password and zeroize the plaintext buffer
    pub fn hash_secure(&self, plain: &mut String) -> Result<String, AppError> {
        let hash = self.hash(plain);
        plain.zeroize();
        hash
    }

    /// Verify a password against a hash; the cost is read from the hash itself
    pub fn verify(&self, hash: &str, plain: &str) -> bool {
        verify_password(hash, plain)
    }
}

/// Malformed hashes never match
fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Hasher {
        Hasher::new(4).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = cheap();
        for password in ["pw", "correct horse battery staple", "ünïcödé", " "] {
            let hash = hasher.hash(password).unwrap();
            assert_ne!(hash, password);
            assert!(hasher.verify(&hash, password));
        }
    }

    #[test]
    fn test_wrong_password_fails() {
        let hasher = cheap();
        let hash = hasher.hash("pw").unwrap();
        assert!(!hasher.verify(&hash, "pw2"));
        assert!(!hasher.verify(&hash, "PW"));
        assert!(!hasher.verify(&hash, ""));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = cheap();
        let first = hasher.hash("pw").unwrap();
        let second = hasher.hash("pw").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$scrypt$"));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("", "pw"));
        assert!(!verify_password("plaintext", "plaintext"));
    }

    #[test]
    fn test_hash_secure_clears_input() {
        let hasher = cheap();
        let mut plain = "secret".to_string();
        let hash = hasher.hash_secure(&mut plain).unwrap();
        assert!(plain.is_empty());
        assert!(verify_password(&hash, "secret"));
    }
}

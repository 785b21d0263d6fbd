//! One-way password hashing.
//!
//! New hashes default to salted Argon2id PHC strings. The unsalted SHA-256
//! hex digest is kept as a selectable scheme so stores written by older
//! releases keep verifying; `verify_password` recognises either format.

use crate::error::{Result, StoreError};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
pub const ARGON2_ITERATIONS: u32 = 2;
pub const ARGON2_PARALLELISM: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Argon2id,
    Sha256,
}

pub fn hash_password(scheme: PasswordScheme, password: &str) -> Result<String> {
    match scheme {
        PasswordScheme::Argon2id => argon2_hash(password),
        PasswordScheme::Sha256 => Ok(sha256_hex(password)),
    }
}

/// Check `password` against a stored hash of either scheme.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    if stored.starts_with('$') {
        let parsed =
            PasswordHash::new(stored).map_err(|e| StoreError::PasswordHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    } else {
        let digest = sha256_hex(password);
        Ok(digest.as_bytes().ct_eq(stored.as_bytes()).into())
    }
}

/// Lower-case hex SHA-256 of the UTF-8 password.
pub fn sha256_hex(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn argon2_hash(password: &str) -> Result<String> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        None,
    )
    .map_err(|e| StoreError::PasswordHash(format!("argon2 params: {e}")))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    argon
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| StoreError::PasswordHash(format!("argon2 hash: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_digest() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha256_is_deterministic_and_distinguishes_inputs() {
        assert_eq!(sha256_hex("pw1"), sha256_hex("pw1"));
        assert_ne!(sha256_hex("pw1"), sha256_hex("pw2"));
        assert_eq!(sha256_hex("").len(), 64);
    }

    #[test]
    fn argon2_hashes_are_salted_phc_strings() {
        let a = hash_password(PasswordScheme::Argon2id, "secret").unwrap();
        let b = hash_password(PasswordScheme::Argon2id, "secret").unwrap();
        assert!(a.starts_with("$argon2id$"));
        assert_ne!(a, b);
        assert!(verify_password("secret", &a).unwrap());
        assert!(verify_password("secret", &b).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password_for_both_schemes() {
        for scheme in [PasswordScheme::Argon2id, PasswordScheme::Sha256] {
            let stored = hash_password(scheme, "correct horse").unwrap();
            assert!(verify_password("correct horse", &stored).unwrap());
            assert!(!verify_password("battery staple", &stored).unwrap());
        }
    }

    #[test]
    fn verify_errors_on_malformed_phc_string() {
        let err = verify_password("anything", "$not-a-phc-string").unwrap_err();
        assert!(matches!(err, StoreError::PasswordHash(_)));
    }

    #[test]
    fn scheme_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PasswordScheme::Argon2id).unwrap(),
            "\"argon2id\""
        );
        let parsed: PasswordScheme = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(parsed, PasswordScheme::Sha256);
    }
}

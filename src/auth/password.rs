//! Salted password digests.
//!
//! Each account stores a random per-account salt and the SHA-256 digest of
//! salt bytes followed by the password bytes, both hex-encoded.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generates a fresh random salt, hex-encoded.
pub fn generate_salt() -> String {
    let salt: [u8; 16] = rand::rng().random();
    hex::encode(salt)
}

/// Computes the hex digest for a password under the given hex salt.
pub fn hash_password(password: &str, salt_hex: &str) -> String {
    let mut hasher = Sha256::new();
    // Salt is stored as hex; hashing the hex form keeps verification
    // independent of decode failures on corrupt rows.
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a password attempt against a stored salt and digest.
pub fn verify_password(password: &str, salt_hex: &str, digest_hex: &str) -> bool {
    hash_password(password, salt_hex) == digest_hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let salt = generate_salt();
        let digest = hash_password("correct horse", &salt);
        assert!(verify_password("correct horse", &salt, &digest));
        assert!(!verify_password("wrong horse", &salt, &digest));
    }

    #[test]
    fn test_salts_are_unique_and_change_digest() {
        let salt_a = generate_salt();
        let salt_b = generate_salt();
        assert_ne!(salt_a, salt_b);
        assert_ne!(
            hash_password("password123", &salt_a),
            hash_password("password123", &salt_b)
        );
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = hash_password("x", "00");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

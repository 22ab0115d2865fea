use sha2::{Digest, Sha256};

/// Fresh random salt for a new account.
pub fn new_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Salted SHA-256 of a password, hex encoded.
///
/// This keeps plaintext out of the store. It is a single fast hash, not a
/// password KDF, and offers no protection against offline guessing.
pub fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(password_digest("salt", "pw"), password_digest("salt", "pw"));
    }

    #[test]
    fn test_digest_depends_on_salt_and_password() {
        let base = password_digest("salt", "pw");
        assert_ne!(base, password_digest("other", "pw"));
        assert_ne!(base, password_digest("salt", "pw2"));
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = password_digest("s", "p");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!digest.contains('p'));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(new_salt(), new_salt());
    }
}

//! Opaque password credential primitive
//!
//! Hashes are salted SHA-256 digests encoded as `salt$hash` with URL-safe
//! base64. The scheme is deliberately treated as an implementation detail:
//! callers only ever `hash` on registration and `verify` on login, so the
//! algorithm can be swapped without touching the rest of the platform.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Hash a plaintext password with a fresh random salt.
///
/// # Examples
///
/// ```
/// use roster_org::password;
///
/// let digest = password::hash("correct horse battery");
/// assert!(password::verify("correct horse battery", &digest));
/// assert!(!password::verify("wrong", &digest));
/// ```
pub fn hash(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
    let digest = digest_with(&salt, password);
    format!(
        "{}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

/// Check a plaintext password against a stored digest.
///
/// Returns `false` for digests that do not parse; a corrupted stored
/// credential must never authenticate.
pub fn verify(password: &str, stored: &str) -> bool {
    let Some((salt_part, hash_part)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = URL_SAFE_NO_PAD.decode(salt_part) else {
        return false;
    };
    let Ok(expected) = URL_SAFE_NO_PAD.decode(hash_part) else {
        return false;
    };

    digest_with(&salt, password) == expected
}

fn digest_with(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let digest = hash("hunter22");
        assert!(verify("hunter22", &digest));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let digest = hash("hunter22");
        assert!(!verify("hunter23", &digest));
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let a = hash("same-password");
        let b = hash("same-password");
        assert_ne!(a, b);
        assert!(verify("same-password", &a));
        assert!(verify("same-password", &b));
    }

    #[test]
    fn test_garbage_digest_never_authenticates() {
        assert!(!verify("anything", "not-a-digest"));
        assert!(!verify("anything", "bad$base64!!"));
        assert!(!verify("anything", ""));
    }
}

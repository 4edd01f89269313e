//! Password-based key derivation.

use crate::config::KEY_LENGTH;
use crate::error::{Error, Result};
use sha2::{Digest, Sha256};

/// A fixed-length symmetric key derived from a password.
///
/// The same key is used for both content and file name encryption within a
/// session. It is always passed explicitly; nothing in the crate holds key
/// material in global state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DerivedKey([u8; KEY_LENGTH]);

impl DerivedKey {
    /// Derive a key from a password.
    ///
    /// A single unsalted SHA-256 pass over the password bytes: the same
    /// password always reproduces the same key, which is what lets a later
    /// session decrypt files with no stored key material. This is weaker
    /// against brute force than a memory-hard KDF, but switching the
    /// derivation would orphan every file encrypted under it, so there is
    /// no salt and no work-factor knob.
    ///
    /// Fails with [`Error::EmptyPassword`] when the password is empty or
    /// whitespace-only.
    pub fn derive(password: &str) -> Result<Self> {
        if password.trim().is_empty() {
            return Err(Error::EmptyPassword);
        }

        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        let digest = hasher.finalize();

        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&digest);
        Ok(Self(key))
    }

    /// Raw key bytes, sized exactly for the content cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_password_same_key() {
        let key1 = DerivedKey::derive("password123").unwrap();
        let key2 = DerivedKey::derive("password123").unwrap();

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_different_passwords_different_keys() {
        let key1 = DerivedKey::derive("password1").unwrap();
        let key2 = DerivedKey::derive("password2").unwrap();

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_known_sha256_vector() {
        let key = DerivedKey::derive("password").unwrap();

        assert_eq!(
            hex::encode(key.as_bytes()),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            DerivedKey::derive(""),
            Err(Error::EmptyPassword)
        ));
    }

    #[test]
    fn test_whitespace_password_rejected() {
        assert!(matches!(
            DerivedKey::derive("  \t "),
            Err(Error::EmptyPassword)
        ));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = DerivedKey::derive("secret").unwrap();
        let rendered = format!("{:?}", key);

        assert_eq!(rendered, "DerivedKey(..)");
    }
}

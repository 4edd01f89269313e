//! AES-256-GCM authenticated encryption of file contents.

use crate::crypto::kdf::DerivedKey;
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;

/// Nonce size for AES-GCM (96 bits).
const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits).
const TAG_SIZE: usize = 16;

/// AES-256-GCM cipher bound to a derived key.
pub struct Cipher {
    cipher: Aes256Gcm,
}

impl Cipher {
    /// Create a cipher from a derived key.
    pub fn new(key: &DerivedKey) -> Self {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).expect("Invalid key length");
        Self { cipher }
    }

    /// Encrypt data with a random nonce.
    ///
    /// Returns: nonce (12 bytes) || ciphertext || tag (16 bytes)
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))?;

        // Prepend nonce to ciphertext
        let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    /// Decrypt data that was encrypted with `encrypt`.
    ///
    /// Expects: nonce (12 bytes) || ciphertext || tag (16 bytes)
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
            return Err(Error::Authentication);
        }

        let (nonce_bytes, ciphertext) = ciphertext.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| Error::Authentication)
    }
}

/// Encrypt file content with a derived key.
///
/// The whole buffer is encrypted in one pass; memory use is proportional to
/// the file size.
pub fn encrypt_content(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    Cipher::new(key).encrypt(plaintext)
}

/// Decrypt file content produced by [`encrypt_content`].
///
/// A wrong key or tampered ciphertext fails authentication and returns
/// [`Error::Authentication`] instead of garbage bytes.
pub fn decrypt_content(key: &DerivedKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    Cipher::new(key).decrypt(ciphertext)
}

//! Reversible encryption of file names into filesystem-safe tokens.

use crate::crypto::cipher::Cipher;
use crate::crypto::kdf::DerivedKey;
use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Encrypt a file name into a token that is itself a valid file name.
///
/// The name's UTF-8 bytes are encrypted with the derived key and the
/// ciphertext is base64url-encoded without padding, so tokens use only
/// `A-Z a-z 0-9 - _` and carry no path separators or reserved characters.
/// Only base names belong here; directory components are never encoded.
pub fn encode_name(key: &DerivedKey, name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }

    let ciphertext = Cipher::new(key).encrypt(name.as_bytes())?;
    Ok(URL_SAFE_NO_PAD.encode(ciphertext))
}

/// Recover the original file name from a token produced by [`encode_name`].
///
/// Any failure (malformed token, wrong key, non-UTF-8 plaintext) collapses
/// to [`Error::NameDecode`], a value callers can branch on rather than an
/// abort. The presentation layer decides whether to render a placeholder.
pub fn decode_name(key: &DerivedKey, token: &str) -> Result<String> {
    let ciphertext = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| Error::NameDecode)?;

    let plaintext = Cipher::new(key)
        .decrypt(&ciphertext)
        .map_err(|_| Error::NameDecode)?;

    String::from_utf8(plaintext).map_err(|_| Error::NameDecode)
}

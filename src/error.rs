//! Error types for kubli.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kubli operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving keys or transforming files.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Password was empty or whitespace-only.
    #[error("Password must not be empty")]
    EmptyPassword,

    /// File name was empty.
    #[error("File name must not be empty")]
    EmptyName,

    /// Target path is missing or not a directory.
    #[error("Not a directory: {0}")]
    InvalidDirectory(PathBuf),

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Content decryption failed (wrong password or corrupted data).
    #[error("Decryption failed: wrong password or corrupted data")]
    Authentication,

    /// File name token could not be decoded back to a name.
    #[error("Unreadable file name token")]
    NameDecode,
}

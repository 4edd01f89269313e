//! Cryptographic operations for kubli.
//!
//! This module provides:
//! - SHA-256 password-based key derivation
//! - AES-256-GCM authenticated encryption of file contents
//! - Reversible file name encryption into filesystem-safe tokens

mod cipher;
mod kdf;
mod name;

pub use cipher::{decrypt_content, encrypt_content, Cipher};
pub use kdf::DerivedKey;
pub use name::{decode_name, encode_name};

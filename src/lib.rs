//! Kubli - password-based directory encryption.
//!
//! Encrypts or decrypts every regular file in a directory with a key
//! derived from a password, obscuring file contents and file names alike.
//! Encrypted output carries the `.kubli` extension and a file name replaced
//! by an encrypted, filesystem-safe token.
//!
//! # Features
//!
//! - **AES-256-GCM Encryption**: authenticated encryption, so a wrong
//!   password is detected instead of producing garbage
//! - **File Name Encryption**: names become reversible base64url tokens
//! - **Batch Workflow**: plan, preview, confirm, execute, report - one
//!   bad file never aborts the rest of the batch
//!
//! # Example
//!
//! ```rust,no_run
//! use kubli::{BatchPlan, BatchReport, DerivedKey, Mode};
//! use std::path::Path;
//!
//! let key = DerivedKey::derive("correct horse battery staple").unwrap();
//!
//! let mut plan = BatchPlan::build(Path::new("./vault"), Mode::Encrypt).unwrap();
//! let results = plan.execute(&key, false);
//! let report = BatchReport::from_results(results);
//! assert!(report.all_succeeded());
//! ```

pub mod batch;
pub mod config;
pub mod crypto;
pub mod error;

pub use batch::{
    BatchPlan, BatchReport, EntryStatus, FailureKind, FileEntry, Mode, Outcome, PreviewEntry,
    TransformResult,
};
pub use crypto::{decode_name, decrypt_content, encode_name, encrypt_content, DerivedKey};
pub use error::{Error, Result};

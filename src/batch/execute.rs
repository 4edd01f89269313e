//! Batch execution: the per-file transform pipeline.

use crate::batch::plan::{transformed_name, BatchPlan, EntryStatus, FileEntry, Mode};
use crate::crypto::{decrypt_content, encrypt_content, DerivedKey};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Why an entry failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Content did not authenticate: wrong password or corrupted file.
    WrongKeyOrCorruptFile,
    /// File name token could not be decoded.
    UnreadableName,
    /// Read or write failed.
    Io,
}

/// What happened to one planned file.
#[derive(Debug, Serialize, Deserialize)]
pub enum Outcome {
    /// A transformed file was written.
    Transformed {
        /// Path of the new file.
        output: PathBuf,
        /// Whether the original was removed afterwards.
        deleted: bool,
        /// Set when deletion was requested but failed; the output file is
        /// still valid.
        delete_warning: Option<String>,
    },
    /// No output was produced for this entry.
    Failed {
        kind: FailureKind,
        message: String,
    },
}

/// Outcome of processing one planned file. Every plan entry yields exactly
/// one of these, in plan order.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransformResult {
    /// Base name of the original file.
    pub original: String,
    /// What happened to it.
    pub outcome: Outcome,
}

impl TransformResult {
    /// Whether a transformed file was written for this entry.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Transformed { .. })
    }
}

impl BatchPlan {
    /// Run the plan to completion, one file at a time, in plan order.
    ///
    /// Each file is read, its content transformed, its name transformed,
    /// and the result written next to the original. A per-file failure
    /// marks that entry [`EntryStatus::Failed`] and processing continues
    /// with the next file; the batch never aborts midway. When
    /// `delete_originals` is set, the original is removed after a
    /// successful write; a failed deletion becomes a warning on the
    /// result, not a failure.
    pub fn execute(&mut self, key: &DerivedKey, delete_originals: bool) -> Vec<TransformResult> {
        let mode = self.mode;
        let directory = self.directory.clone();

        self.entries
            .iter_mut()
            .map(|entry| {
                let outcome = process_entry(key, mode, &directory, entry, delete_originals);
                entry.status = match &outcome {
                    Outcome::Transformed { deleted: true, .. } => EntryStatus::Deleted,
                    Outcome::Transformed { .. } => EntryStatus::Transformed,
                    Outcome::Failed { .. } => EntryStatus::Failed,
                };
                TransformResult {
                    original: entry.name.clone(),
                    outcome,
                }
            })
            .collect()
    }
}

/// Read, transform, write, and optionally delete a single file.
fn process_entry(
    key: &DerivedKey,
    mode: Mode,
    directory: &Path,
    entry: &FileEntry,
    delete_original: bool,
) -> Outcome {
    let original = match fs::read(&entry.path) {
        Ok(bytes) => bytes,
        Err(e) => return failure(Error::Io(e)),
    };

    let transformed = match mode {
        Mode::Encrypt => encrypt_content(key, &original),
        Mode::Decrypt => decrypt_content(key, &original),
    };
    let transformed = match transformed {
        Ok(bytes) => bytes,
        Err(e) => return failure(e),
    };

    // Reuse the previewed output name when there is one
    let output_name = match &entry.transformed_name {
        Some(name) => name.clone(),
        None => match transformed_name(key, mode, &entry.name) {
            Ok(name) => name,
            Err(e) => return failure(e),
        },
    };
    let output = directory.join(output_name);

    if let Err(e) = write_replace(&output, &transformed) {
        return failure(Error::Io(e));
    }

    let mut deleted = false;
    let mut delete_warning = None;
    if delete_original {
        match fs::remove_file(&entry.path) {
            Ok(()) => deleted = true,
            Err(e) => delete_warning = Some(e.to_string()),
        }
    }

    Outcome::Transformed {
        output,
        deleted,
        delete_warning,
    }
}

/// Write `bytes` to `target` without ever leaving a partial file: the data
/// goes to a temporary sibling first and is renamed into place.
fn write_replace(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = target.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    if let Err(e) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, target)
}

fn failure(error: Error) -> Outcome {
    let kind = match &error {
        Error::Authentication => FailureKind::WrongKeyOrCorruptFile,
        Error::NameDecode | Error::EmptyName => FailureKind::UnreadableName,
        _ => FailureKind::Io,
    };
    Outcome::Failed {
        kind,
        message: error.to_string(),
    }
}

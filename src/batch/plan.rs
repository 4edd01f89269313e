//! Directory enumeration and batch planning.

use crate::config::ENCRYPTED_SUFFIX;
use crate::crypto::{decode_name, encode_name, DerivedKey};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Operation applied to every file in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Encrypt plain files into `.kubli` files.
    Encrypt,
    /// Decrypt `.kubli` files back into plain files.
    Decrypt,
}

/// Processing state of a single planned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Selected by enumeration, not yet shown to the user.
    Pending,
    /// Included in a rendered preview.
    Previewed,
    /// Output file written.
    Transformed,
    /// Output written and the original removed.
    Deleted,
    /// No output produced for this entry.
    Failed,
}

/// One regular file selected for processing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path to the original file.
    pub path: PathBuf,
    /// Base name of the original file.
    pub name: String,
    /// Whether the name already carries the reserved extension.
    pub is_encrypted: bool,
    /// Output name, filled in by [`BatchPlan::preview`]. Execution reuses
    /// it so the written file matches what the user was shown (encryption
    /// is nonce-randomized, so recomputing would yield a different token).
    pub transformed_name: Option<String>,
    /// Current processing state.
    pub status: EntryStatus,
}

/// A preview line: the original name and the name its output would get.
///
/// A decrypt preview keeps decode failures as values so the caller can
/// render a placeholder without losing the entry.
#[derive(Debug)]
pub struct PreviewEntry {
    /// Base name of the original file.
    pub original: String,
    /// Output name, or the error that computing it produced.
    pub transformed: Result<String>,
}

/// The finalized list of files and the operation to apply to each.
///
/// Built fresh for every invocation and discarded after reporting; only
/// per-entry statuses change once the plan exists.
#[derive(Debug)]
pub struct BatchPlan {
    /// Directory the plan was built from.
    pub directory: PathBuf,
    /// Operation to apply.
    pub mode: Mode,
    /// Selected files in enumeration order.
    pub entries: Vec<FileEntry>,
}

impl BatchPlan {
    /// Enumerate `directory` and build a plan for `mode`.
    ///
    /// Only regular files directly inside the directory are considered;
    /// subdirectories are not recursed into and not listed. Encrypt mode
    /// skips files already carrying the reserved extension and this
    /// program's own executable; Decrypt mode keeps only files with the
    /// reserved extension. Entries are sorted by name so repeated runs
    /// produce the same plan.
    ///
    /// Fails with [`Error::InvalidDirectory`] before touching any file
    /// when the path is missing or not a directory.
    pub fn build(directory: &Path, mode: Mode) -> Result<Self> {
        if !directory.is_dir() {
            return Err(Error::InvalidDirectory(directory.to_path_buf()));
        }

        let own_exe = std::env::current_exe()
            .ok()
            .and_then(|p| p.canonicalize().ok());

        let mut entries = Vec::new();

        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };

            let selected = match mode {
                Mode::Encrypt => {
                    !name.ends_with(ENCRYPTED_SUFFIX)
                        && !is_own_executable(&path, own_exe.as_deref())
                }
                Mode::Decrypt => name.ends_with(ENCRYPTED_SUFFIX),
            };

            if selected {
                let is_encrypted = name.ends_with(ENCRYPTED_SUFFIX);
                entries.push(FileEntry {
                    path,
                    name,
                    is_encrypted,
                    transformed_name: None,
                    status: EntryStatus::Pending,
                });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            directory: directory.to_path_buf(),
            mode,
            entries,
        })
    }

    /// Whether the plan selected no files at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of selected files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Compute the output name every entry would get.
    ///
    /// Marks each entry [`EntryStatus::Previewed`]. Decrypt-mode decode
    /// failures stay in the list as error values; the entry is not dropped.
    pub fn preview(&mut self, key: &DerivedKey) -> Vec<PreviewEntry> {
        let mode = self.mode;
        self.entries
            .iter_mut()
            .map(|entry| {
                entry.status = EntryStatus::Previewed;
                let transformed = transformed_name(key, mode, &entry.name);
                entry.transformed_name = transformed.as_ref().ok().cloned();
                PreviewEntry {
                    original: entry.name.clone(),
                    transformed,
                }
            })
            .collect()
    }
}

/// Output file name for one entry: `<token>.kubli` when encrypting, the
/// decrypted original name when decrypting.
pub(crate) fn transformed_name(key: &DerivedKey, mode: Mode, name: &str) -> Result<String> {
    match mode {
        Mode::Encrypt => {
            let token = encode_name(key, name)?;
            Ok(format!("{}{}", token, ENCRYPTED_SUFFIX))
        }
        Mode::Decrypt => {
            let token = name.strip_suffix(ENCRYPTED_SUFFIX).unwrap_or(name);
            let decoded = decode_name(key, token)?;
            // A recovered name must stay a plain base name
            if decoded.contains(['/', '\\']) || decoded == "." || decoded == ".." {
                return Err(Error::NameDecode);
            }
            Ok(decoded)
        }
    }
}

fn is_own_executable(path: &Path, own_exe: Option<&Path>) -> bool {
    match own_exe {
        Some(exe) => path.canonicalize().map(|p| p == exe).unwrap_or(false),
        None => false,
    }
}

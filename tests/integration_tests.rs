//! Integration tests for the end-to-end directory workflow.

use kubli::config::ENCRYPTED_SUFFIX;
use kubli::{
    decode_name, encode_name, BatchPlan, BatchReport, DerivedKey, FailureKind, Mode, Outcome,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn test_key() -> DerivedKey {
    DerivedKey::derive("pw1").unwrap()
}

/// File names currently present in a directory.
fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_full_workflow_encrypt_then_decrypt() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dir = temp_dir.path();
    let key = test_key();

    let originals: HashMap<&str, &[u8]> = HashMap::from([
        ("notes.txt", b"hello world".as_slice()),
        ("photo.jpg", b"\xff\xd8\xff\xe0 not really a jpeg".as_slice()),
        ("empty.bin", b"".as_slice()),
    ]);
    for (name, content) in &originals {
        fs::write(dir.join(name), content).unwrap();
    }

    // Encrypt, deleting the originals
    let mut plan = BatchPlan::build(dir, Mode::Encrypt).expect("Failed to build plan");
    assert_eq!(plan.len(), 3);
    let report = BatchReport::from_results(plan.execute(&key, true));
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.deleted, 3);
    assert!(report.all_succeeded());

    // Only token-named .kubli files remain, none readable as plain names
    let encrypted_names = dir_names(dir);
    assert_eq!(encrypted_names.len(), 3);
    for name in &encrypted_names {
        assert!(name.ends_with(ENCRYPTED_SUFFIX));
        let token = name.strip_suffix(ENCRYPTED_SUFFIX).unwrap();
        let decoded = decode_name(&key, token).expect("Token should decode");
        assert!(originals.contains_key(decoded.as_str()));
    }

    // Decrypt, deleting the encrypted files
    let mut plan = BatchPlan::build(dir, Mode::Decrypt).expect("Failed to build plan");
    assert_eq!(plan.len(), 3);
    let report = BatchReport::from_results(plan.execute(&key, true));
    assert_eq!(report.succeeded, 3);

    // Original names and contents are back
    for (name, content) in &originals {
        assert_eq!(fs::read(dir.join(name)).unwrap(), *content);
    }
    assert_eq!(dir_names(dir).len(), 3);
}

#[test]
fn test_encrypt_skips_already_encrypted_and_keeps_original() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let key = test_key();

    fs::write(dir.join("notes.txt"), b"hello").unwrap();
    fs::write(dir.join("earlier.kubli"), b"opaque blob").unwrap();

    let mut plan = BatchPlan::build(dir, Mode::Encrypt).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan.entries[0].name, "notes.txt");

    let results = plan.execute(&key, false);
    assert_eq!(results.len(), 1);

    // The new encrypted file decodes back to notes.txt / "hello"
    let output = match &results[0].outcome {
        Outcome::Transformed { output, .. } => output.clone(),
        other => panic!("expected success, got {:?}", other),
    };
    let output_name = output.file_name().unwrap().to_str().unwrap();
    let token = output_name.strip_suffix(ENCRYPTED_SUFFIX).unwrap();
    assert_eq!(decode_name(&key, token).unwrap(), "notes.txt");

    let ciphertext = fs::read(&output).unwrap();
    assert_eq!(kubli::decrypt_content(&key, &ciphertext).unwrap(), b"hello");

    // Deletion was not requested, so the original survives
    assert!(dir.join("notes.txt").exists());
    // The pre-existing encrypted file was left alone
    assert_eq!(fs::read(dir.join("earlier.kubli")).unwrap(), b"opaque blob");
}

#[test]
fn test_decrypt_with_wrong_password_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    fs::write(dir.join("secret.txt"), b"classified").unwrap();
    let mut plan = BatchPlan::build(dir, Mode::Encrypt).unwrap();
    plan.execute(&test_key(), true);

    let before = dir_names(dir);
    assert_eq!(before.len(), 1);
    let encrypted_bytes = fs::read(dir.join(&before[0])).unwrap();

    let wrong_key = DerivedKey::derive("not pw1").unwrap();
    let mut plan = BatchPlan::build(dir, Mode::Decrypt).unwrap();
    let report = BatchReport::from_results(plan.execute(&wrong_key, true));

    assert_eq!(report.failed, 1);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.deleted, 0);
    match &report.results[0].outcome {
        Outcome::Failed { kind, .. } => assert_eq!(*kind, FailureKind::WrongKeyOrCorruptFile),
        other => panic!("expected failure, got {:?}", other),
    }

    // No output file, original encrypted file untouched
    assert_eq!(dir_names(dir), before);
    assert_eq!(fs::read(dir.join(&before[0])).unwrap(), encrypted_bytes);
}

#[test]
fn test_corrupt_file_fails_alone_in_a_batch_of_four() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let key = test_key();

    for name in ["a.txt", "b.txt", "c.txt"] {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
    let mut plan = BatchPlan::build(dir, Mode::Encrypt).unwrap();
    plan.execute(&key, true);

    // Plant a fourth file with a valid token name but broken content
    let token = encode_name(&key, "broken.txt").unwrap();
    fs::write(
        dir.join(format!("{}{}", token, ENCRYPTED_SUFFIX)),
        b"not ciphertext",
    )
    .unwrap();

    let mut plan = BatchPlan::build(dir, Mode::Decrypt).unwrap();
    assert_eq!(plan.len(), 4);
    let report = BatchReport::from_results(plan.execute(&key, false));

    assert_eq!(report.results.len(), 4);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 1);
    for name in ["a.txt", "b.txt", "c.txt"] {
        assert_eq!(fs::read(dir.join(name)).unwrap(), name.as_bytes());
    }
    assert!(!dir.join("broken.txt").exists());
}

#[test]
fn test_decrypt_preview_marks_foreign_tokens_unreadable() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let key = test_key();

    // One file encrypted under this key, one under another
    let other_key = DerivedKey::derive("someone elses password").unwrap();
    let mine = encode_name(&key, "mine.txt").unwrap();
    let theirs = encode_name(&other_key, "theirs.txt").unwrap();
    fs::write(dir.join(format!("{}{}", mine, ENCRYPTED_SUFFIX)), b"x").unwrap();
    fs::write(dir.join(format!("{}{}", theirs, ENCRYPTED_SUFFIX)), b"x").unwrap();

    let mut plan = BatchPlan::build(dir, Mode::Decrypt).unwrap();
    let preview = plan.preview(&key);

    assert_eq!(preview.len(), 2);
    let readable = preview.iter().filter(|p| p.transformed.is_ok()).count();
    assert_eq!(readable, 1);
    let ok = preview.iter().find(|p| p.transformed.is_ok()).unwrap();
    assert_eq!(ok.transformed.as_ref().unwrap(), "mine.txt");
}

#[test]
fn test_report_json_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    fs::write(dir.join("doc.txt"), b"data").unwrap();
    let mut plan = BatchPlan::build(dir, Mode::Encrypt).unwrap();
    let report = BatchReport::from_results(plan.execute(&test_key(), false));

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: BatchReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.succeeded, report.succeeded);
    assert_eq!(parsed.failed, report.failed);
    assert_eq!(parsed.results.len(), report.results.len());
    assert_eq!(parsed.results[0].original, "doc.txt");
}

#[test]
fn test_same_password_decrypts_across_sessions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    fs::write(dir.join("letter.txt"), b"dear friend").unwrap();

    // Derive the key twice, independently, as two sessions would
    let key_one = DerivedKey::derive("shared secret").unwrap();
    let mut plan = BatchPlan::build(dir, Mode::Encrypt).unwrap();
    plan.execute(&key_one, true);

    let key_two = DerivedKey::derive("shared secret").unwrap();
    let mut plan = BatchPlan::build(dir, Mode::Decrypt).unwrap();
    let report = BatchReport::from_results(plan.execute(&key_two, true));

    assert!(report.all_succeeded());
    assert_eq!(fs::read(dir.join("letter.txt")).unwrap(), b"dear friend");
}

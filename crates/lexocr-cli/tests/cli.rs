//! Smoke tests for the lexocr binary.
//!
//! These avoid the OCR engine entirely: they exercise argument handling,
//! upload validation, and config management, none of which start a worker.

use assert_cmd::Command;
use predicates::prelude::*;

fn lexocr() -> Command {
    Command::cargo_bin("lexocr").unwrap()
}

#[test]
fn help_lists_commands() {
    lexocr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn scan_rejects_missing_input() {
    lexocr()
        .args(["scan", "does-not-exist.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn scan_rejects_non_image_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "pas une image").unwrap();

    lexocr()
        .args(["scan", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fichier image"));
}

#[test]
fn config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    lexocr()
        .args(["config", "init", "--output", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"fra\""));
}

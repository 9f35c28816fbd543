// Integration tests for `chronicler edit` against real editor processes
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn edit_command(data_dir: &Path, editor: &str) -> Command {
    let mut cmd = Command::cargo_bin("chronicler").unwrap();
    cmd.env_clear()
        .env("CHRONICLER_DIR", data_dir)
        .env("CHRONICLER_EDITOR", editor);
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    cmd.args(["edit", "--date", "2024-02-29"]);
    cmd
}

fn empty_journal() -> TempDir {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("journal_entries.json"), "[]").unwrap();
    temp_dir
}

// Create a mock editor script for testing
fn create_mock_editor(dir: &Path, content: &str, executable: bool) -> PathBuf {
    let path = dir.join("mock_editor.sh");
    let mut file = File::create(&path).expect("Failed to create mock editor script");
    file.write_all(content.as_bytes())
        .expect("Failed to write to mock editor script");

    let mode = if executable { 0o755 } else { 0o644 };
    fs::set_permissions(&path, fs::Permissions::from_mode(mode))
        .expect("Failed to set permissions");
    path
}

#[test]
#[serial]
fn test_edit_saves_document_from_editor() {
    let journal = empty_journal();
    let scripts = tempdir().unwrap();
    let editor = create_mock_editor(
        scripts.path(),
        "#!/bin/sh\nprintf '# Leap day\\n\\nAn extra day this year.\\n' > \"$1\"\n",
        true,
    );

    edit_command(journal.path(), editor.to_str().unwrap())
        .assert()
        .success()
        .stdout("Saved new entry for 2024-02-29.\n");

    let saved = fs::read_to_string(journal.path().join("journal_entries.json")).unwrap();
    assert!(saved.contains("\"title\": \"Leap day\""));
    assert!(saved.contains("\"content\": \"An extra day this year.\""));
}

#[test]
#[serial]
fn test_edit_without_changes_leaves_file_alone() {
    let journal = empty_journal();

    edit_command(journal.path(), "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes"));

    assert_eq!(
        fs::read_to_string(journal.path().join("journal_entries.json")).unwrap(),
        "[]"
    );
}

#[test]
#[serial]
fn test_editor_command_not_found() {
    let journal = empty_journal();

    edit_command(journal.path(), "nonexistent_editor_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
#[serial]
fn test_editor_non_zero_exit() {
    let journal = empty_journal();
    let scripts = tempdir().unwrap();
    let editor = create_mock_editor(
        scripts.path(),
        "#!/bin/sh\nprintf '# Discarded\\n' > \"$1\"\nexit 3\n",
        true,
    );

    edit_command(journal.path(), editor.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-zero status code: 3"));

    assert_eq!(
        fs::read_to_string(journal.path().join("journal_entries.json")).unwrap(),
        "[]"
    );
}

#[test]
#[serial]
fn test_editor_permission_denied() {
    let journal = empty_journal();
    let scripts = tempdir().unwrap();
    let editor = create_mock_editor(scripts.path(), "#!/bin/sh\nexit 0\n", false);

    edit_command(journal.path(), editor.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));
}

#[test]
#[serial]
fn test_editor_with_arguments_is_rejected() {
    let journal = empty_journal();

    edit_command(journal.path(), "vim --noplugin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot contain spaces"));
}

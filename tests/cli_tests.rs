use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Sets up a `chronicler` command with a clean environment and its data
/// directory inside `data_dir`.
fn set_up_command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("chronicler").unwrap();
    cmd.env_clear()
        .env("CHRONICLER_DIR", data_dir)
        .env("CHRONICLER_EDITOR", "true");
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd
}

fn empty_journal() -> TempDir {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("journal_entries.json"), "[]").unwrap();
    temp_dir
}

#[test]
#[serial]
fn test_cli_no_args_shows_calendar_and_seeds_samples() {
    let temp_dir = tempdir().unwrap();
    let data_dir = temp_dir.path().join("Chronicler");

    set_up_command(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(" Su  Mo  Tu  We  Th  Fr  Sa"))
        .stdout(predicate::str::contains("with an entry"));

    let saved = fs::read_to_string(data_dir.join("journal_entries.json")).unwrap();
    assert!(saved.contains("\"TEST TEST TEST\""));
    assert!(saved.contains("\"createdAt\""));
}

#[test]
#[serial]
fn test_cli_write_show_calendar_delete() {
    let temp_dir = empty_journal();

    set_up_command(temp_dir.path())
        .args(["write", "--date", "2024-01-15", "--title", "Monday"])
        .write_stdin("Went for a walk.\nSaw a heron.\n")
        .assert()
        .success()
        .stdout("Saved new entry for 2024-01-15.\n");

    set_up_command(temp_dir.path())
        .args(["show", "--date", "20240115"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday, January 15, 2024"))
        .stdout(predicate::str::contains("# Monday"))
        .stdout(predicate::str::contains("Went for a walk.\nSaw a heron."));

    set_up_command(temp_dir.path())
        .args(["calendar", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2024"))
        .stdout(predicate::str::contains("15*"))
        .stdout(predicate::str::contains("1 day with an entry"));

    set_up_command(temp_dir.path())
        .args(["delete", "-d", "2024-01-15"])
        .assert()
        .success()
        .stdout("Deleted entry for 2024-01-15.\n");

    set_up_command(temp_dir.path())
        .args(["show", "--date", "2024-01-15"])
        .assert()
        .success()
        .stdout("No entry for 2024-01-15.\n");
}

#[test]
#[serial]
fn test_cli_write_twice_updates_same_entry() {
    let temp_dir = empty_journal();

    for body in ["first", "second"] {
        set_up_command(temp_dir.path())
            .args(["write", "--date", "2024-03-02"])
            .write_stdin(body)
            .assert()
            .success();
    }

    set_up_command(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout("2024-03-02  (untitled)  (6 chars)\n");
}

#[test]
#[serial]
fn test_cli_list_sample_entries() {
    let temp_dir = tempdir().unwrap();

    let output = set_up_command(temp_dir.path())
        .arg("list")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let titles: Vec<&str> = stdout
        .lines()
        .map(|line| line.split("  ").nth(1).unwrap())
        .collect();
    assert_eq!(titles, ["TEST", "TEST TEST", "TEST TEST TEST"]);
}

#[test]
#[serial]
fn test_cli_corrupt_file_is_quarantined() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("journal_entries.json"), "{ not json").unwrap();

    set_up_command(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("TEST TEST TEST"));

    let quarantined: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("journal_entries.json.corrupt-"))
        .collect();
    assert_eq!(quarantined.len(), 1);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(&quarantined[0])).unwrap(),
        "{ not json"
    );
}

#[test]
#[serial]
fn test_cli_invalid_date() {
    let temp_dir = empty_journal();

    set_up_command(temp_dir.path())
        .args(["show", "--date", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
#[serial]
fn test_cli_invalid_month() {
    let temp_dir = empty_journal();

    set_up_command(temp_dir.path())
        .args(["calendar", "--month", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
#[serial]
fn test_cli_calendar_for_far_future_month() {
    let temp_dir = empty_journal();

    set_up_command(temp_dir.path())
        .args(["calendar", "--month", "262142-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("December"))
        .stdout(predicate::str::contains("0 days with an entry"));
}

#[test]
#[serial]
fn test_cli_editor_with_arguments_only_blocks_edit() {
    let temp_dir = empty_journal();

    set_up_command(temp_dir.path())
        .env_remove("CHRONICLER_EDITOR")
        .env("EDITOR", "code --wait")
        .arg("list")
        .assert()
        .success()
        .stdout("No entries yet.\n");

    set_up_command(temp_dir.path())
        .env_remove("CHRONICLER_EDITOR")
        .env("EDITOR", "code --wait")
        .args(["edit", "--date", "2024-01-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot contain spaces"));
}

#[test]
#[serial]
fn test_cli_invalid_autosave_delay() {
    let temp_dir = empty_journal();

    set_up_command(temp_dir.path())
        .env("CHRONICLER_AUTOSAVE_MS", "0")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CHRONICLER_AUTOSAVE_MS"));
}

#[test]
#[serial]
fn test_cli_json_logs_go_to_stderr() {
    let temp_dir = empty_journal();

    let output = set_up_command(temp_dir.path())
        .args(["--log-format", "json", "--log-level", "debug", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "No entries yet.\n");

    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert!(!lines.is_empty());
    for line in lines {
        assert!(line.starts_with('{') && line.ends_with('}'), "not JSON: {}", line);
    }
    assert!(stderr.contains("correlation_id"));
    assert!(stderr.contains("app_invocation"));
}

#[test]
#[serial]
fn test_cli_help() {
    let temp_dir = empty_journal();

    set_up_command(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calendar"))
        .stdout(predicate::str::contains("write"))
        .stdout(predicate::str::contains("--log-format"));
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const BOARD: &str = "\
## Todo
- [ ] Ship it !high @due(2025-03-01) #release
  - [ ] write notes
## Done
- [x] Done task
";

fn markban(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("markban").unwrap();
    // Keep the user's real config out of the tests.
    cmd.arg("--config").arg(dir.join("config.json"));
    cmd
}

#[test]
fn test_parse_prints_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let board = temp_dir.path().join("board.md");
    fs::write(&board, BOARD).unwrap();

    markban(temp_dir.path())
        .arg("parse")
        .arg(&board)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Todo\""))
        .stdout(predicate::str::contains("\"dueDate\": \"2025-03-01\""))
        .stdout(predicate::str::contains("\"priority\": \"high\""));
}

#[test]
fn test_parse_respects_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("config.json"), r#"{"pretty_json": false}"#).unwrap();

    markban(temp_dir.path())
        .arg("parse")
        .arg("-")
        .write_stdin(BOARD)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"Todo\""));
}

#[test]
fn test_parse_rejects_non_board() {
    let temp_dir = tempfile::tempdir().unwrap();

    markban(temp_dir.path())
        .arg("parse")
        .arg("-")
        .write_stdin("# Just notes\n\nNo columns here.\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid kanban file"));
}

#[test]
fn test_format_from_stdin() {
    let temp_dir = tempfile::tempdir().unwrap();

    markban(temp_dir.path())
        .arg("fmt")
        .arg("-")
        .write_stdin(BOARD)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\n\nkanban-plugin: board\n\n---\n"))
        .stdout(predicate::str::contains(
            "- [ ] Ship it !high @due(2025-03-01) #release\n  - [ ] write notes\n",
        ))
        .stdout(predicate::str::ends_with("%%\n"));
}

#[test]
fn test_format_write_then_check() {
    let temp_dir = tempfile::tempdir().unwrap();
    let board = temp_dir.path().join("board.md");
    fs::write(&board, BOARD).unwrap();

    markban(temp_dir.path())
        .arg("format")
        .arg("--write")
        .arg(&board)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&board).unwrap();
    assert!(written.contains("%% kanban:settings"));

    markban(temp_dir.path())
        .arg("check")
        .arg(&board)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (2 columns, 2 cards)"));
}

#[test]
fn test_generate_from_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let json = r#"{"columns":[{"title":"Inbox","cards":[{"text":"Read","completed":true,"subtasks":[{"text":"chapter 1","indentation":1}]}]}]}"#;

    markban(temp_dir.path())
        .arg("generate")
        .arg("-")
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Inbox\n\n- [x] Read\n  - [ ] chapter 1\n"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    markban(temp_dir.path())
        .arg("summary")
        .arg(temp_dir.path().join("absent.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

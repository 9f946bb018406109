use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn taskdesk(db: &Path, args: &[&str]) -> Output {
    taskdesk_with_stdin(db, args, "")
}

fn taskdesk_with_stdin(db: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_taskdesk"))
        .arg("--db")
        .arg(db)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn creates_and_lists_tasks_in_a_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tasks_db.db");

    assert_eq!(taskdesk(&db, &["category", "add", "Work"]).status.code(), Some(0));
    let added = taskdesk(
        &db,
        &["task", "add", "Report", "-c", "Work", "-d", "Q3 numbers"],
    );
    assert_eq!(added.status.code(), Some(0), "stderr: {}", stderr(&added));

    let listed = taskdesk(&db, &["tasks", "--category", "Work"]);
    assert_eq!(listed.status.code(), Some(0));
    assert_eq!(stdout(&listed).trim_end(), "[ ] Report");
}

#[test]
fn corrupt_database_is_fatal_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("corrupt.db");
    std::fs::write(&db, vec![0x42_u8; 4096]).unwrap();

    let output = taskdesk(&db, &["categories"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("DatabaseError:"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn newer_schema_version_is_fatal_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("future.db");
    let conn = taskdesk_core::open_db(&db).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let output = taskdesk(&db, &["categories"]);
    assert_eq!(output.status.code(), Some(1));
    let diagnostic = stderr(&output);
    assert!(diagnostic.starts_with("DatabaseError:"));
    assert!(diagnostic.contains("999"));
}

#[test]
fn rejected_input_exits_with_code_two() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tasks_db.db");

    assert_eq!(taskdesk(&db, &["category", "add", "Work"]).status.code(), Some(0));
    let duplicate = taskdesk(&db, &["category", "add", "Work"]);
    assert_eq!(duplicate.status.code(), Some(2));
    assert_eq!(
        stderr(&duplicate).trim_end(),
        "A category named \"Work\" already exists."
    );

    let missing = taskdesk(&db, &["task", "show", "Ghost"]);
    assert_eq!(missing.status.code(), Some(2));
    assert_eq!(stderr(&missing).trim_end(), "No task named \"Ghost\".");
}

#[test]
fn declined_confirmation_keeps_category() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tasks_db.db");
    assert_eq!(taskdesk(&db, &["category", "add", "Work"]).status.code(), Some(0));

    let declined = taskdesk_with_stdin(&db, &["category", "delete", "Work"], "n\n");
    assert_eq!(declined.status.code(), Some(0));
    assert_eq!(stdout(&declined).trim_end(), "Cancelled.");
    assert!(stderr(&declined).contains("[y/N]"));

    let listed = taskdesk(&db, &["categories"]);
    assert_eq!(stdout(&listed).trim_end(), "Work");

    let confirmed = taskdesk_with_stdin(&db, &["category", "delete", "Work"], "y\n");
    assert_eq!(confirmed.status.code(), Some(0));
    let listed = taskdesk(&db, &["categories"]);
    assert_eq!(stdout(&listed).trim_end(), "(no categories)");
}

#[test]
fn json_mode_reports_errors_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tasks_db.db");

    let output = taskdesk(&db, &["--json", "tasks", "--category", "Gone"]);
    assert_eq!(output.status.code(), Some(2));
    let body: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(body["error"], "not_found");
}

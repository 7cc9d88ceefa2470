//! Integration tests for the `orbit` CLI.
//!
//! Each test points `orbit` at a fresh temp data directory with `-C`,
//! runs it as a subprocess, and checks stdout and/or the stored files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `orbit` binary.
fn orbit_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("orbit");
    path
}

/// Run `orbit -C <dir>/data` with the given args from `dir`, returning
/// (stdout, stderr, success).
fn run_orbit(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(orbit_bin())
        .arg("-C")
        .arg(dir.join("data"))
        .args(args)
        .current_dir(dir)
        .env_remove("ORBIT_DIR")
        .env_remove("ORBIT_LOG")
        .output()
        .expect("failed to run orbit");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `orbit` expecting success, return stdout.
fn run_orbit_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_orbit(dir, args);
    if !success {
        panic!(
            "orbit {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Add a task and return its id
fn add(dir: &Path, args: &[&str]) -> String {
    let mut full = vec!["add"];
    full.extend_from_slice(args);
    run_orbit_ok(dir, &full).trim().to_string()
}

fn show_json(dir: &Path) -> serde_json::Value {
    serde_json::from_str(&run_orbit_ok(dir, &["show", "--json"])).unwrap()
}

fn group_texts(show: &serde_json::Value, group: &str) -> Vec<String> {
    show["groups"]
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["id"] == group)
        .unwrap()["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// First run and read commands
// ---------------------------------------------------------------------------

#[test]
fn test_first_run_has_default_board() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_orbit_ok(tmp.path(), &["boards"]);
    assert!(out.contains("My Board"));
    assert!(out.starts_with('*'));
}

#[test]
fn test_add_and_show_kanban() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), &["Buy milk"]);
    add(tmp.path(), &["Ship release", "-s", "done"]);
    add(
        tmp.path(),
        &["Write report", "--sub", "outline", "--sub", "draft"],
    );

    let out = run_orbit_ok(tmp.path(), &["show"]);
    assert!(out.contains("My Board (kanban)"));
    assert!(out.contains("== To Do (2) =="));
    assert!(out.contains("== Done (1) =="));
    assert!(out.contains("Write report [0/2]"));
    assert!(out.contains("[ ] 1. outline"));
}

#[test]
fn test_show_matrix_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), &["Fix outage", "-s", "ui"]);

    let out = run_orbit_ok(tmp.path(), &["show", "--view", "matrix", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["view"], "matrix");
    assert_eq!(group_texts(&parsed, "urgent-important"), vec!["Fix outage"]);
    // Viewing a projection does not change the stored view
    assert_eq!(show_json(tmp.path())["view"], "kanban");
}

#[test]
fn test_unknown_status_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_orbit(tmp.path(), &["add", "x", "-s", "someday"]);
    assert!(!success);
    assert!(stderr.contains("unknown status"));
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[test]
fn test_mv_changes_status_and_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = add(tmp.path(), &["a"]);
    let b = add(tmp.path(), &["b"]);
    let c = add(tmp.path(), &["c", "-s", "done"]);

    let out = run_orbit_ok(tmp.path(), &["mv", &b, "done", "--before", &c]);
    assert!(out.contains("moved"));
    let show = show_json(tmp.path());
    assert_eq!(group_texts(&show, "todo"), vec!["a"]);
    assert_eq!(group_texts(&show, "done"), vec!["b", "c"]);

    run_orbit_ok(tmp.path(), &["mv", &a, "inprogress"]);
    let show = show_json(tmp.path());
    assert_eq!(group_texts(&show, "inprogress"), vec!["a"]);
}

#[test]
fn test_edit_toggle_rm() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add(tmp.path(), &["Draft", "--sub", "one"]);

    run_orbit_ok(tmp.path(), &["edit", &id, "Final draft"]);
    let out = run_orbit_ok(tmp.path(), &["toggle", &id, "1"]);
    assert_eq!(out.trim(), "[x] one");

    let show = show_json(tmp.path());
    let task = &show["groups"][1]["tasks"][0];
    assert_eq!(task["text"], "Final draft");
    assert_eq!(task["subtasks"][0]["completed"], true);

    let (_, stderr, success) = run_orbit(tmp.path(), &["toggle", &id, "2"]);
    assert!(!success);
    assert!(stderr.contains("no subtask 2"));

    run_orbit_ok(tmp.path(), &["rm", &id]);
    let (_, stderr, success) = run_orbit(tmp.path(), &["rm", &id]);
    assert!(!success);
    assert!(stderr.contains("task not found"));
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

#[test]
fn test_board_lifecycle() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_orbit_ok(tmp.path(), &["board", "new", "Work"]);
    add(tmp.path(), &["Plan sprint"]);

    let out = run_orbit_ok(tmp.path(), &["boards", "--json"]);
    let boards: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(boards.as_array().unwrap().len(), 2);
    assert_eq!(boards[1]["name"], "Work");
    assert_eq!(boards[1]["active"], true);
    assert_eq!(boards[1]["tasks"], 1);

    run_orbit_ok(tmp.path(), &["board", "rename", "work", "Office"]);
    let out = run_orbit_ok(tmp.path(), &["board", "use", "My Board"]);
    assert!(out.contains("active board: My Board"));

    run_orbit_ok(tmp.path(), &["board", "rm", "Office", "--yes"]);
    let out = run_orbit_ok(tmp.path(), &["boards"]);
    assert!(!out.contains("Office"));
}

#[test]
fn test_last_board_cannot_be_deleted() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_orbit(tmp.path(), &["board", "rm", "My Board", "--yes"]);
    assert!(!success);
    assert!(stderr.contains("You must have at least one board."));
}

#[test]
fn test_board_clear_with_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), &["a"]);
    add(tmp.path(), &["b"]);
    run_orbit_ok(tmp.path(), &["board", "clear", "--yes"]);
    let out = run_orbit_ok(tmp.path(), &["boards", "--json"]);
    let boards: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(boards[0]["tasks"], 0);
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[test]
fn test_view_toggle_and_set() {
    let tmp = tempfile::TempDir::new().unwrap();
    assert_eq!(run_orbit_ok(tmp.path(), &["view"]).trim(), "matrix");
    assert_eq!(run_orbit_ok(tmp.path(), &["view", "kanban"]).trim(), "kanban");
    let (_, _, success) = run_orbit(tmp.path(), &["view", "gantt"]);
    assert!(!success);
}

#[test]
fn test_prefs_persist() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_orbit_ok(
        tmp.path(),
        &["prefs", "--theme", "light", "--tabs", "off"],
    );
    let out = run_orbit_ok(tmp.path(), &["prefs", "--json"]);
    let prefs: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(prefs["theme"], "light");
    assert_eq!(prefs["show_tabs_dock"], false);
    assert_eq!(prefs["show_ui_buttons"], true);
}

// ---------------------------------------------------------------------------
// Backups and storage
// ---------------------------------------------------------------------------

#[test]
fn test_export_then_import_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), &["Keep me"]);
    let out = run_orbit_ok(tmp.path(), &["export", "-o", "backup.json"]);
    assert!(out.contains("exported 1 boards"));
    let backup = tmp.path().join("backup.json");
    let content = fs::read_to_string(&backup).unwrap();
    assert!(content.contains("Keep me"));

    run_orbit_ok(tmp.path(), &["board", "clear", "--yes"]);
    let out = run_orbit_ok(tmp.path(), &["import", "backup.json"]);
    assert!(out.contains("imported 1 boards"));
    let show = show_json(tmp.path());
    assert_eq!(group_texts(&show, "todo"), vec!["Keep me"]);
}

#[test]
fn test_export_to_stdout() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), &["Inline"]);
    let out = run_orbit_ok(tmp.path(), &["export", "-o", "-"]);
    let boards: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(boards[0]["tasks"][0]["text"], "Inline");
}

#[test]
fn test_malformed_import_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), &["Survivor"]);
    fs::write(tmp.path().join("bad.json"), "{ not json").unwrap();
    fs::write(tmp.path().join("empty.json"), "[]").unwrap();

    let (_, stderr, success) = run_orbit(tmp.path(), &["import", "bad.json"]);
    assert!(!success);
    assert!(stderr.contains("Invalid file format"));
    let (_, _, success) = run_orbit(tmp.path(), &["import", "empty.json"]);
    assert!(!success);

    let show = show_json(tmp.path());
    assert_eq!(group_texts(&show, "todo"), vec!["Survivor"]);
}

#[test]
fn test_reset_with_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_orbit_ok(tmp.path(), &["board", "new", "Work"]);
    run_orbit_ok(tmp.path(), &["reset", "--yes"]);
    let out = run_orbit_ok(tmp.path(), &["boards"]);
    assert!(out.contains("My Board"));
    assert!(!out.contains("Work"));
}

#[test]
fn test_reset_prompt_defaults_to_no() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_orbit_ok(tmp.path(), &["board", "new", "Work"]);
    // stdin is empty, so the prompt takes its default
    let (stdout, stderr, success) = run_orbit(tmp.path(), &["reset"]);
    assert!(success);
    assert!(stderr.contains("[y/N]"));
    assert!(stdout.contains("cancelled"));
    assert!(run_orbit_ok(tmp.path(), &["boards"]).contains("Work"));
}

#[test]
fn test_unreadable_boards_are_not_overwritten() {
    let tmp = tempfile::TempDir::new().unwrap();
    let data = tmp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    let path = data.join("storage.json");
    let stored = r#"{"orbit_boards":[{"id":1,"name":"Work","tasks":[{"id":2,"text":"keep me","status":"todo","subtasks":[{"completed":false}]}]}]}"#;
    fs::write(&path, stored).unwrap();

    let (_, stderr, success) = run_orbit(tmp.path(), &["add", "new"]);
    assert!(!success);
    assert!(stderr.contains("orbit reset"));
    assert_eq!(fs::read_to_string(&path).unwrap(), stored);

    run_orbit_ok(tmp.path(), &["reset", "--yes"]);
    add(tmp.path(), &["new"]);
    let show = show_json(tmp.path());
    assert_eq!(group_texts(&show, "todo"), vec!["new"]);
}

#[test]
fn test_backend_override_uses_local_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_orbit_ok(tmp.path(), &["--backend", "local", "add", "Stored locally"]);
    assert!(tmp.path().join("data/local_storage.json").exists());
    assert!(!tmp.path().join("data/storage.json").exists());

    let out = run_orbit_ok(tmp.path(), &["--backend", "local", "show"]);
    assert!(out.contains("Stored locally"));
}

#[test]
fn test_default_backend_writes_storage_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    add(tmp.path(), &["Stored"]);
    let raw = fs::read_to_string(tmp.path().join("data/storage.json")).unwrap();
    assert!(raw.contains("Stored"));
}

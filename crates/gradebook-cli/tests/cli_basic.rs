//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_gradebook-cli"))
        .env("GRADEBOOK_HOME", home)
        .env_remove("GRADEBOOK_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

#[test]
fn test_semester_add_uses_catalog() {
    let home = TempDir::new().unwrap();
    let report = run_json(home.path(), &["semester", "add"]);
    assert_eq!(report["name"], "1. Klasse, 1. Semester");
    assert_eq!(report["subjects"].as_array().unwrap().len(), 12);

    let list = run_json(home.path(), &["semester", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["subjects"][0], "Deutsch");
}

#[test]
fn test_grade_add_and_report() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["semester", "add"]);
    run_json(home.path(), &["grade", "add", "0", "0", "Aufsatz", "5.5"]);

    let report = run_json(home.path(), &["report", "--semester", "0"]);
    assert_eq!(report["average"], 5.5);
    assert_eq!(report["plus_points"], 1.5);
    assert_eq!(report["subjects"][0]["grade_count"], 1);
}

#[test]
fn test_invalid_grade_is_rejected() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["semester", "add"]);

    let (code, _, stderr) = run_cli(home.path(), &["grade", "add", "0", "0", "Test", "7"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "stderr: {stderr}");

    let report = run_json(home.path(), &["report", "--semester", "0"]);
    assert_eq!(report["subjects"][0]["grade_count"], 0);
}

#[test]
fn test_grade_edit_requires_a_change() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["semester", "add"]);
    run_json(home.path(), &["grade", "add", "0", "0", "Test", "4"]);

    let (code, _, _) = run_cli(home.path(), &["grade", "edit", "0", "0", "0"]);
    assert_eq!(code, 1);

    let report = run_json(home.path(), &["grade", "edit", "0", "0", "0", "--value", "5"]);
    assert_eq!(report["subjects"][0]["average"], 5.0);
}

#[test]
fn test_target() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["semester", "add"]);
    run_json(home.path(), &["grade", "add", "0", "0", "Test", "4"]);

    let solved = run_json(home.path(), &["target", "0", "0", "5"]);
    assert_eq!(solved["needed"], 6.0);
    assert_eq!(solved["outcome"], "reachable");

    let solved = run_json(home.path(), &["target", "0", "0", "6", "--weight", "0.5"]);
    assert_eq!(solved["outcome"], "impossible");

    let solved = run_json(home.path(), &["target", "0", "0", "4.5", "--weight", "3"]);
    assert_eq!(solved["needed"], 4.67);
}

#[test]
fn test_subject_toggle() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["semester", "add"]);
    run_json(home.path(), &["grade", "add", "0", "0", "Test", "5"]);
    run_json(home.path(), &["grade", "add", "0", "1", "Test", "4"]);

    let report = run_json(home.path(), &["subject", "toggle", "0", "0"]);
    assert_eq!(report["subjects"][0]["contributes"], false);
    assert_eq!(report["average"], 4.0);

    let report = run_json(home.path(), &["subject", "toggle", "0", "0"]);
    assert_eq!(report["average"], 4.5);
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "storage.backend"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "sqlite");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "storage.backend", "json"]);
    assert_eq!(code, 0);

    run_json(home.path(), &["semester", "add"]);
    assert!(home.path().join("grades.json").exists());

    let (code, _, _) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_snapshot_export_import() {
    let source = TempDir::new().unwrap();
    run_json(source.path(), &["semester", "add", "--name", "HS 2026"]);
    run_json(source.path(), &["grade", "add", "0", "0", "Test", "4.5", "--weight", "2"]);

    let exported = source.path().join("export.json");
    let (code, _, _) = run_cli(
        source.path(),
        &["snapshot", "export", "--output", exported.to_str().unwrap()],
    );
    assert_eq!(code, 0);

    let target = TempDir::new().unwrap();
    let (code, stdout, _) =
        run_cli(target.path(), &["snapshot", "import", exported.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("imported 1"));

    let before = run_json(source.path(), &["report"]);
    let after = run_json(target.path(), &["report"]);
    assert_eq!(before, after);
}

#[test]
fn test_snapshot_import_replaces_unreadable_store() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "storage.backend", "json"]);
    assert_eq!(code, 0);
    std::fs::write(
        home.path().join("grades.json"),
        r#"[{"name": "S1", "subjects": [{"name": "Math", "grades": [{"name": "Test", "value": 9.0, "weight": 1.0}]}]}]"#,
    )
    .unwrap();

    let (code, _, stderr) = run_cli(home.path(), &["report"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "stderr: {stderr}");

    let good = home.path().join("good.json");
    std::fs::write(
        &good,
        r#"[{"name": "S1", "subjects": [{"name": "Math", "grades": [{"name": "Test", "value": 5.0, "weight": 1.0}]}]}]"#,
    )
    .unwrap();
    let (code, stdout, stderr) = run_cli(home.path(), &["snapshot", "import", good.to_str().unwrap()]);
    assert_eq!(code, 0, "import failed: {stderr}");
    assert!(stdout.contains("imported 1"));

    let report = run_json(home.path(), &["report", "--semester", "0"]);
    assert_eq!(report["average"], 5.0);
}

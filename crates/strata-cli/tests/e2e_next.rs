//! E2E tests for `st next`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

fn st_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("st"));
    cmd.current_dir(dir);
    cmd.env("STRATA_LOG", "error");
    cmd
}

// ---------------------------------------------------------------------------
// Selection behavior
// ---------------------------------------------------------------------------

#[test]
fn in_progress_item_is_picked_first() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("work_items.json"),
        r#"[
            {"id": "1", "title": "Set up repo", "status": "completed"},
            {"id": "2", "title": "Add API", "status": "in_progress", "dependencies": ["1"]},
            {"id": "3", "title": "Add UI", "status": "not_started", "dependencies": ["1", "2"]},
            {"id": "4", "title": "Fix flaky test", "status": "blocked", "dependencies": ["1"]},
            {"id": "5", "title": "Ship", "status": "not_started", "dependencies": ["3"]}
        ]"#,
    )
    .expect("write snapshot");

    st_cmd(dir.path())
        .args(["next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID:       2"))
        .stdout(predicate::str::contains("Add API"));
}

#[test]
fn highest_priority_ready_item_wins() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("work_items.json"),
        r#"[
            {"id": "low", "title": "Cleanup", "status": "not_started", "priority": "low"},
            {"id": "crit", "title": "Hotfix", "status": "not_started", "priority": "critical"}
        ]"#,
    )
    .expect("write snapshot");

    st_cmd(dir.path())
        .args(["next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID:       crit"))
        .stdout(predicate::str::contains("Priority: critical"));
}

#[test]
fn gated_item_is_not_picked() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("work_items.json"),
        r#"[
            {"id": "dep", "title": "Groundwork", "status": "not_started", "priority": "low"},
            {"id": "gated", "title": "Payoff", "status": "not_started", "priority": "critical", "dependencies": ["dep"]}
        ]"#,
    )
    .expect("write snapshot");

    st_cmd(dir.path())
        .args(["next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID:       dep"));
}

#[test]
fn empty_snapshot_reports_nothing_available() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("work_items.json"), "[]").expect("write snapshot");

    st_cmd(dir.path())
        .args(["next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no work item is ready right now"));
}

// ---------------------------------------------------------------------------
// JSON contract
// ---------------------------------------------------------------------------

#[test]
fn json_output_has_stable_fields() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("work_items.json"),
        r#"[{"id": "only", "title": "Solo", "status": "not_started", "priority": "high"}]"#,
    )
    .expect("write snapshot");

    let output = st_cmd(dir.path())
        .args(["next", "--json"])
        .output()
        .expect("run st next");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["id"], "only");
    assert_eq!(json["title"], "Solo");
    assert_eq!(json["status"], "not_started");
    assert_eq!(json["priority"], "high");
}

#[test]
fn json_nothing_available_is_a_message_object() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("work_items.json"), "[]").expect("write snapshot");

    let output = st_cmd(dir.path())
        .args(["next", "--json"])
        .output()
        .expect("run st next");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!(json["message"].as_str().is_some());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn missing_snapshot_file_exits_one() {
    let dir = TempDir::new().expect("tempdir");

    st_cmd(dir.path())
        .args(["next"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn duplicate_ids_exit_one() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("work_items.json"),
        r#"[{"id": "a", "title": "One"}, {"id": "a", "title": "Two"}]"#,
    )
    .expect("write snapshot");

    st_cmd(dir.path())
        .args(["next"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate work item id"));
}

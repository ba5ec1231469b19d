//! E2E tests for `st graph`.
//!
//! Each test runs the binary against a snapshot document in an isolated
//! temp directory and checks output text and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the st binary, rooted in `dir`.
fn st_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("st"));
    cmd.current_dir(dir);
    cmd.env("STRATA_LOG", "error");
    cmd
}

/// Write a snapshot document into `dir` and return its file name.
fn write_snapshot(dir: &Path, contents: &str) -> String {
    let name = "work_items.json";
    std::fs::write(dir.join(name), contents).expect("write snapshot");
    name.to_string()
}

/// The five-item scenario used across the suite.
const FIVE_ITEMS: &str = r#"[
    {"id": "1", "title": "Set up repo", "status": "completed", "priority": "medium"},
    {"id": "2", "title": "Add API", "status": "in_progress", "priority": "medium", "dependencies": ["1"]},
    {"id": "3", "title": "Add UI", "status": "not_started", "priority": "medium", "dependencies": ["1", "2"]},
    {"id": "4", "title": "Fix flaky test", "status": "blocked", "priority": "medium", "dependencies": ["1"]},
    {"id": "5", "title": "Ship", "status": "not_started", "priority": "medium", "dependencies": ["3"]}
]"#;

// ---------------------------------------------------------------------------
// ASCII report
// ---------------------------------------------------------------------------

#[test]
fn ascii_report_renders_levels_and_markers() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    st_cmd(dir.path())
        .args(["graph", "--include-completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work item levels"))
        .stdout(predicate::str::contains("● Set up repo (1)"))
        .stdout(predicate::str::contains("◐ Add API (2)"))
        .stdout(predicate::str::contains("✗ Fix flaky test (4)"))
        .stdout(predicate::str::contains("[CRITICAL PATH]"))
        .stdout(predicate::str::contains("Timeline projection"));
}

#[test]
fn ascii_report_with_analysis_sections() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    st_cmd(dir.path())
        .args(["graph", "--include-completed", "--bottlenecks", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bottlenecks"))
        .stdout(predicate::str::contains("1 — blocks 3 items"))
        .stdout(predicate::str::contains("Stats"))
        .stdout(predicate::str::contains("critical path length: 4"));
}

// ---------------------------------------------------------------------------
// DOT output
// ---------------------------------------------------------------------------

#[test]
fn dot_output_is_well_formed() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    let output = st_cmd(dir.path())
        .args(["graph", "--include-completed", "--format", "dot"])
        .output()
        .expect("run st graph");
    assert!(output.status.success());

    let dot = String::from_utf8_lossy(&output.stdout);
    assert!(dot.starts_with("digraph work_items {"));
    assert_eq!(dot.matches('{').count(), dot.matches('}').count());
    assert_eq!(dot.matches(" -> ").count(), 5, "one edge per dependency");
    assert!(dot.contains("color=red"), "critical path painted red");
}

#[test]
fn dot_output_writes_to_file() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    st_cmd(dir.path())
        .args([
            "graph",
            "--include-completed",
            "--format",
            "dot",
            "--output",
            "deps.dot",
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(dir.path().join("deps.dot")).expect("read deps.dot");
    assert!(written.contains("digraph work_items"));
}

// ---------------------------------------------------------------------------
// Filters and focus
// ---------------------------------------------------------------------------

#[test]
fn empty_filter_result_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    st_cmd(dir.path())
        .args(["graph", "--milestone", "no-such-milestone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no work items match"));
}

#[test]
fn missing_focus_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    st_cmd(dir.path())
        .args(["graph", "--include-completed", "--focus", "w-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("focus item not found: w-missing"));
}

#[test]
fn focus_restricts_to_neighborhood() {
    let dir = TempDir::new().expect("tempdir");
    // "5" depends on "3"; "4" is outside that chain.
    write_snapshot(dir.path(), FIVE_ITEMS);

    let output = st_cmd(dir.path())
        .args(["graph", "--include-completed", "--focus", "5"])
        .output()
        .expect("run st graph");
    assert!(output.status.success());

    let report = String::from_utf8_lossy(&output.stdout);
    assert!(report.contains("Ship (5)"));
    assert!(report.contains("Set up repo (1)"), "transitive ancestor kept");
    assert!(!report.contains("Fix flaky test"), "unrelated item dropped");
}

#[test]
fn status_filter_narrows_items() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    let output = st_cmd(dir.path())
        .args(["graph", "--status", "not_started"])
        .output()
        .expect("run st graph");
    assert!(output.status.success());

    let report = String::from_utf8_lossy(&output.stdout);
    assert!(report.contains("Add UI (3)"));
    assert!(!report.contains("Add API (2)"));
}

#[test]
fn invalid_status_value_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    st_cmd(dir.path())
        .args(["graph", "--status", "doing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status"));
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[test]
fn unparsable_document_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), "{this is not json");

    st_cmd(dir.path())
        .args(["graph"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn record_without_id_exits_one() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), r#"[{"title": "no id here"}]"#);

    st_cmd(dir.path())
        .args(["graph"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field `id`"));
}

#[test]
fn missing_file_exits_one() {
    let dir = TempDir::new().expect("tempdir");

    st_cmd(dir.path())
        .args(["graph", "--file", "nowhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn cyclic_dependencies_do_not_crash() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(
        dir.path(),
        r#"[
            {"id": "a", "title": "A", "status": "not_started", "dependencies": ["b"]},
            {"id": "b", "title": "B", "status": "not_started", "dependencies": ["a"]}
        ]"#,
    );

    st_cmd(dir.path())
        .args(["graph"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work item levels"));
}

// ---------------------------------------------------------------------------
// JSON contract
// ---------------------------------------------------------------------------

#[test]
fn json_output_carries_analysis() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    let output = st_cmd(dir.path())
        .args(["graph", "--include-completed", "--json"])
        .output()
        .expect("run st graph");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["items"], 5);
    assert_eq!(json["critical_path"]["length"], 4);
    assert_eq!(json["stats"]["total"], 5);
    assert_eq!(json["bottlenecks"][0]["id"], "1");
    assert_eq!(json["bottlenecks"][0]["blocks"], 3);
    assert_eq!(json["cycles_detected"], false);
}

// ---------------------------------------------------------------------------
// SVG path validation
// ---------------------------------------------------------------------------

#[test]
fn svg_without_output_path_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write_snapshot(dir.path(), FIVE_ITEMS);

    st_cmd(dir.path())
        .args(["graph", "--include-completed", "--format", "svg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --output"));
}

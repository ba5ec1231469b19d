//! DOT graph-description text.
//!
//! # Node styling
//!
//! Color precedence: critical-path membership paints a node `red` before any
//! status color is considered. Otherwise completed is `green`, in-progress
//! `blue`, blocked `orange`, and anything else (including unrecognized
//! status) `black`. Completed nodes are `rounded,filled`, in-progress
//! `rounded,bold`, the rest plain `rounded`.
//!
//! # Edges
//!
//! One directed edge per dependency pair whose endpoints both exist in the
//! snapshot, dependency → dependent. Missing dependency ids emit nothing.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::graph::critical_path::CriticalPath;
use crate::model::Status;
use crate::snapshot::Snapshot;

/// Titles longer than this are truncated in node labels.
pub const MAX_LABEL_TITLE: usize = 30;

/// Node color, critical-path first. The single place status → color lives.
#[must_use]
pub const fn node_color(status: Status, on_critical_path: bool) -> &'static str {
    if on_critical_path {
        return "red";
    }
    match status {
        Status::Completed => "green",
        Status::InProgress => "blue",
        Status::Blocked => "orange",
        Status::NotStarted | Status::Unknown => "black",
    }
}

/// Node style by status.
#[must_use]
pub const fn node_style(status: Status) -> &'static str {
    match status {
        Status::Completed => "rounded,filled",
        Status::InProgress => "rounded,bold",
        Status::NotStarted | Status::Blocked | Status::Unknown => "rounded",
    }
}

/// Render the snapshot as DOT text.
#[must_use]
pub fn render_dot(snapshot: &Snapshot, path: &CriticalPath) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph work_items {{");
    let _ = writeln!(out, "  rankdir=LR;");
    let _ = writeln!(out, "  node [shape=box];");
    let _ = writeln!(out);

    for item in snapshot.items() {
        let label = format!(
            "{}\\n{}\\n[{}]",
            escape_label(&item.id),
            escape_label(&truncate_title(&item.title)),
            item.status
        );
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\", color={}, style=\"{}\"];",
            escape_label(&item.id),
            label,
            node_color(item.status, path.contains(&item.id)),
            node_style(item.status)
        );
    }

    let _ = writeln!(out);

    for item in snapshot.items() {
        let mut seen: HashSet<&str> = HashSet::new();
        for dep in &item.dependencies {
            if snapshot.contains(dep) && seen.insert(dep.as_str()) {
                let _ = writeln!(
                    out,
                    "  \"{}\" -> \"{}\";",
                    escape_label(dep),
                    escape_label(&item.id)
                );
            }
        }
    }

    let _ = writeln!(out, "}}");
    out
}

/// Truncate a title to [`MAX_LABEL_TITLE`] characters, appending an ellipsis
/// when anything was cut.
fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_LABEL_TITLE {
        let mut truncated: String = title.chars().take(MAX_LABEL_TITLE).collect();
        truncated.push_str("...");
        truncated
    } else {
        title.to_string()
    }
}

/// Escape backslashes and double quotes for a DOT quoted string.
fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

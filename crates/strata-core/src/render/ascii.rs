//! ASCII level report.
//!
//! One line per item, grouped by dependency level, with a status icon, the
//! title, the id, a critical-path marker, and an indented list of the item's
//! existing dependencies. A timeline-projection section follows.

use std::fmt::Write as _;

use crate::graph::critical_path::CriticalPath;
use crate::graph::levels::TimelineProjection;
use crate::model::{Status, WorkItem};
use crate::snapshot::Snapshot;

/// Status icon for the report. The single place status → icon is decided.
#[must_use]
pub const fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Completed => "●",
        Status::InProgress => "◐",
        Status::Blocked => "✗",
        Status::NotStarted | Status::Unknown => "○",
    }
}

/// Render the level report for an analyzed snapshot.
///
/// `leveled` and `projection` come from [`crate::graph::levels`]; `path`
/// from [`crate::graph::critical_path`]. With `critical_only` set, items off
/// the critical path are omitted (empty levels are skipped entirely).
#[must_use]
pub fn render_report(
    snapshot: &Snapshot,
    leveled: &[Vec<&WorkItem>],
    path: &CriticalPath,
    projection: &TimelineProjection,
    critical_only: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Work item levels");
    let _ = writeln!(out, "{:-<72}", "");

    for (level, items) in leveled.iter().enumerate() {
        let shown: Vec<&&WorkItem> = items
            .iter()
            .filter(|item| !critical_only || path.contains(&item.id))
            .collect();
        if shown.is_empty() {
            continue;
        }

        let _ = writeln!(out, "Level {level}");
        for item in shown {
            let marker = if path.contains(&item.id) {
                " [CRITICAL PATH]"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  {} {} ({}){}",
                status_icon(item.status),
                item.title,
                item.id,
                marker
            );

            let existing: Vec<&str> = item
                .dependencies
                .iter()
                .filter(|dep| snapshot.contains(dep))
                .map(String::as_str)
                .collect();
            if !existing.is_empty() {
                let _ = writeln!(out, "      depends on: {}", existing.join(", "));
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Timeline projection");
    for summary in &projection.levels {
        let _ = writeln!(
            out,
            "  level {}: {} items — {} completed, {} in progress, {} not started, {} blocked",
            summary.level,
            summary.total,
            summary.completed,
            summary.in_progress,
            summary.not_started,
            summary.blocked
        );
    }
    let _ = writeln!(
        out,
        "  estimated levels remaining: {}",
        projection.levels_remaining
    );
    let _ = writeln!(out, "  items within a level may proceed in parallel");

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

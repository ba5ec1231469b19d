//! Summary statistics for a snapshot.

use serde::Serialize;

use crate::graph::critical_path::CriticalPath;
use crate::model::Status;
use crate::snapshot::Snapshot;

/// Completion and critical-path summary for a snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub blocked: usize,
    /// `100 * completed / total`; 0 when the snapshot is empty.
    pub completion_pct: f64,
    /// Levels on the longest dependency chain.
    pub critical_path_length: usize,
    /// Ids on the critical path, in snapshot order.
    pub critical_items: Vec<String>,
}

impl Stats {
    /// Compute statistics for `snapshot` given its critical path.
    #[must_use]
    pub fn compute(snapshot: &Snapshot, path: &CriticalPath) -> Self {
        let mut stats = Self {
            total: snapshot.len(),
            critical_path_length: path.length,
            critical_items: path.ids_ordered(snapshot),
            ..Self::default()
        };

        for item in snapshot.items() {
            match item.status {
                Status::Completed => stats.completed += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::NotStarted => stats.not_started += 1,
                Status::Blocked => stats.blocked += 1,
                Status::Unknown => {}
            }
        }

        if stats.total > 0 {
            #[allow(clippy::cast_precision_loss)]
            {
                stats.completion_pct = 100.0 * stats.completed as f64 / stats.total as f64;
            }
        }

        stats
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

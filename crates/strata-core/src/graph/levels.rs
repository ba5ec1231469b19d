//! Topological leveling and the timeline projection built on it.
//!
//! Level `k` holds exactly the items with dependency depth `k`, so items
//! within a level have no ordering constraints between them and may proceed
//! in parallel. The timeline projection summarizes per-level status counts
//! and estimates how many levels still contain unfinished work.

use serde::Serialize;

use crate::graph::depth::DepthAnalysis;
use crate::model::{Status, WorkItem};
use crate::snapshot::Snapshot;

/// Group items into levels by depth.
///
/// Levels are ascending; items within a level keep original snapshot order.
/// An empty snapshot produces no levels.
#[must_use]
pub fn levels<'a>(snapshot: &'a Snapshot, depths: &DepthAnalysis) -> Vec<Vec<&'a WorkItem>> {
    if snapshot.is_empty() {
        return Vec::new();
    }

    let mut grouped: Vec<Vec<&WorkItem>> = vec![Vec::new(); depths.max_depth() + 1];
    for item in snapshot.items() {
        if let Some(depth) = depths.depth(&item.id) {
            grouped[depth].push(item);
        }
    }
    grouped
}

/// Status counts for one level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub level: usize,
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub blocked: usize,
    /// Items whose recorded status is unrecognized.
    pub other: usize,
}

impl LevelSummary {
    /// `true` when every item in the level is completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.completed == self.total
    }
}

/// Per-level status summary plus an estimate of the remaining work.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimelineProjection {
    pub levels: Vec<LevelSummary>,
    /// Levels that still contain at least one unfinished item.
    pub levels_remaining: usize,
}

/// Summarize leveled items into a timeline projection.
#[must_use]
pub fn timeline(leveled: &[Vec<&WorkItem>]) -> TimelineProjection {
    let levels: Vec<LevelSummary> = leveled
        .iter()
        .enumerate()
        .map(|(level, items)| {
            let mut summary = LevelSummary {
                level,
                total: items.len(),
                ..LevelSummary::default()
            };
            for item in items {
                match item.status {
                    Status::Completed => summary.completed += 1,
                    Status::InProgress => summary.in_progress += 1,
                    Status::NotStarted => summary.not_started += 1,
                    Status::Blocked => summary.blocked += 1,
                    Status::Unknown => summary.other += 1,
                }
            }
            summary
        })
        .collect();

    let levels_remaining = levels.iter().filter(|s| !s.is_done()).count();

    TimelineProjection {
        levels,
        levels_remaining,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

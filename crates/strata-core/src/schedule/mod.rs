//! Next-item selection for a one-item-at-a-time workflow.
//!
//! # Selection order
//!
//! 1. An `in_progress` item always wins over starting new work: the highest
//!    priority one is returned, first-listed on ties.
//! 2. Otherwise the highest-priority *ready* item — `not_started` with every
//!    present dependency completed — again first-listed on ties.
//! 3. Otherwise nothing is available. That is a normal answer, not an error.
//!
//! Dependencies absent from the snapshot never block: they belong to work
//! that is already out of the picture.

use tracing::debug;

use crate::model::{Status, WorkItem};
use crate::snapshot::Snapshot;

/// Pick the next item to act on, or `None` when nothing qualifies.
#[must_use]
pub fn select_next(snapshot: &Snapshot) -> Option<&WorkItem> {
    let in_progress = highest_priority(
        snapshot
            .items()
            .iter()
            .filter(|item| item.status == Status::InProgress),
    );
    if let Some(item) = in_progress {
        debug!(id = %item.id, "resuming in-progress item");
        return Some(item);
    }

    let ready = highest_priority(
        snapshot
            .items()
            .iter()
            .filter(|item| is_ready(item, snapshot)),
    );
    if let Some(item) = ready {
        debug!(id = %item.id, "starting ready item");
    }
    ready
}

/// `true` when the item is `not_started` and every dependency present in the
/// snapshot is completed.
#[must_use]
pub fn is_ready(item: &WorkItem, snapshot: &Snapshot) -> bool {
    item.status == Status::NotStarted
        && item.dependencies.iter().all(|dep| {
            snapshot
                .get(dep)
                .is_none_or(|dep_item| dep_item.status == Status::Completed)
        })
}

/// `true` when the item is `not_started` and at least one listed dependency
/// exists in the snapshot with a non-completed status.
#[must_use]
pub fn is_blocked(item: &WorkItem, snapshot: &Snapshot) -> bool {
    item.status == Status::NotStarted && !is_ready(item, snapshot)
}

/// All ready items, in original snapshot order.
#[must_use]
pub fn ready_items(snapshot: &Snapshot) -> Vec<&WorkItem> {
    snapshot
        .items()
        .iter()
        .filter(|item| is_ready(item, snapshot))
        .collect()
}

/// First item with strictly highest priority; iteration order breaks ties.
fn highest_priority<'a>(items: impl Iterator<Item = &'a WorkItem>) -> Option<&'a WorkItem> {
    let mut best: Option<&WorkItem> = None;
    for item in items {
        match best {
            Some(current) if item.priority <= current.priority => {}
            _ => best = Some(item),
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Bottleneck analysis: items that directly block multiple others.
//!
//! `blocks(x)` counts items whose dependency lists directly contain `x` —
//! direct dependents only, never transitive. An item blocking a single other
//! item is normal sequencing, not a bottleneck, so only `blocks >= 2` is
//! reported.

use std::collections::{HashMap, HashSet};

use crate::model::WorkItem;
use crate::snapshot::Snapshot;

/// Minimum direct-dependent count for an item to count as a bottleneck.
pub const BOTTLENECK_THRESHOLD: usize = 2;

/// One bottleneck entry: an item and how many items it directly blocks.
#[derive(Debug, Clone)]
pub struct Bottleneck<'a> {
    pub id: &'a str,
    pub blocks: usize,
    pub item: &'a WorkItem,
}

/// Find all bottlenecks in `snapshot`, sorted descending by `blocks`.
///
/// Ties keep original snapshot order. Dependency ids absent from the
/// snapshot never appear (there is no item to report).
#[must_use]
pub fn bottlenecks(snapshot: &Snapshot) -> Vec<Bottleneck<'_>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for item in snapshot.items() {
        // An item listing the same dependency twice still blocks once.
        let unique: HashSet<&str> = item.dependencies.iter().map(String::as_str).collect();
        for dep in unique {
            if snapshot.contains(dep) {
                *counts.entry(dep).or_insert(0) += 1;
            }
        }
    }

    let mut result: Vec<Bottleneck<'_>> = snapshot
        .items()
        .iter()
        .filter_map(|item| {
            let blocks = counts.get(item.id.as_str()).copied().unwrap_or(0);
            (blocks >= BOTTLENECK_THRESHOLD).then_some(Bottleneck {
                id: item.id.as_str(),
                blocks,
                item,
            })
        })
        .collect();

    // Stable sort: equal counts keep snapshot order.
    result.sort_by(|a, b| b.blocks.cmp(&a.blocks));
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

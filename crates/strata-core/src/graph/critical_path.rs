//! Critical path analysis.
//!
//! # Overview
//!
//! The critical path is the set of items lying on at least one *longest*
//! dependency chain, measured in depth steps. Items on it determine the
//! minimum number of sequential levels needed to finish all work; any delay
//! on them delays the whole set.
//!
//! # Algorithm
//!
//! 1. Compute [`DepthAnalysis`] for every item (cycle-guarded).
//! 2. Let `D` be the maximum depth (0 for an empty set).
//! 3. Seed the result with every item whose depth equals `D`.
//! 4. Trace backward from each seeded item: include dependencies whose depth
//!    is exactly one less, recursively, down to depth 0.
//!
//! Ties are all included — when several chains share the maximum length,
//! every item on any of them is in the result.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashSet;

use crate::graph::depth::DepthAnalysis;
use crate::snapshot::Snapshot;

/// Result of critical path analysis.
#[derive(Debug, Clone, Default)]
pub struct CriticalPath {
    ids: HashSet<String>,
    /// Number of sequential levels on the longest chain (`max depth + 1`);
    /// 0 for an empty snapshot.
    pub length: usize,
}

impl CriticalPath {
    /// `true` if the item id lies on a longest chain.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Ids on the critical path, in original snapshot order.
    #[must_use]
    pub fn ids_ordered(&self, snapshot: &Snapshot) -> Vec<String> {
        snapshot
            .items()
            .iter()
            .filter(|item| self.ids.contains(&item.id))
            .map(|item| item.id.clone())
            .collect()
    }

    /// Number of items on the critical path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// `true` when no item is on the critical path (empty snapshot).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Compute the critical path for `snapshot`.
///
/// Returns every item on at least one longest dependency chain. Empty input
/// produces an empty result; cyclic input inherits the depth cycle guard and
/// still terminates with a deterministic (possibly partial) path.
#[must_use]
pub fn critical_path(snapshot: &Snapshot, depths: &DepthAnalysis) -> CriticalPath {
    if snapshot.is_empty() {
        return CriticalPath::default();
    }

    let max_depth = depths.max_depth();

    // Seed with every deepest item, then walk back one depth step at a time.
    let mut ids: HashSet<String> = HashSet::new();
    let mut worklist: Vec<&str> = snapshot
        .items()
        .iter()
        .filter(|item| depths.depth(&item.id) == Some(max_depth))
        .map(|item| item.id.as_str())
        .collect();

    for id in &worklist {
        ids.insert((*id).to_string());
    }

    while let Some(id) = worklist.pop() {
        let Some(item) = snapshot.get(id) else { continue };
        let Some(item_depth) = depths.depth(id) else { continue };
        if item_depth == 0 {
            continue;
        }

        for dep in &item.dependencies {
            if depths.depth(dep) == Some(item_depth - 1)
                && ids.insert(dep.clone())
                && let Some(dep_item) = snapshot.get(dep)
            {
                worklist.push(dep_item.id.as_str());
            }
        }
    }

    CriticalPath {
        ids,
        length: max_depth + 1,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

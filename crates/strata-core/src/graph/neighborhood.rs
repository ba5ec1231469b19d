//! Local dependency neighborhood of a focus item.
//!
//! The neighborhood is the focus item plus the full transitive closure of
//! its dependencies (ancestors) and of the items depending on it
//! (descendants). A focus id absent from the snapshot is "nothing found",
//! not an error; a blank focus id is caller error.

use std::collections::HashSet;

use petgraph::Direction;
use petgraph::graph::NodeIndex;

use crate::error::ValidationError;
use crate::graph::build::DepGraph;
use crate::model::WorkItem;
use crate::snapshot::Snapshot;

/// Collect the neighborhood of `focus_id`.
///
/// Returns items in original snapshot order, each once. Absent focus ids
/// yield an empty vec.
///
/// # Errors
///
/// [`ValidationError::EmptyFocusId`] when `focus_id` is empty or whitespace.
pub fn neighborhood<'a>(
    snapshot: &'a Snapshot,
    graph: &DepGraph,
    focus_id: &str,
) -> Result<Vec<&'a WorkItem>, ValidationError> {
    if focus_id.trim().is_empty() {
        return Err(ValidationError::EmptyFocusId);
    }

    let Some(focus) = graph.node_index(focus_id) else {
        return Ok(Vec::new());
    };

    let mut keep: HashSet<NodeIndex> = HashSet::from([focus]);
    collect_reachable(graph, focus, Direction::Incoming, &mut keep);
    collect_reachable(graph, focus, Direction::Outgoing, &mut keep);

    let ids: HashSet<&str> = keep
        .into_iter()
        .filter_map(|idx| graph.item_id(idx))
        .collect();

    Ok(snapshot
        .items()
        .iter()
        .filter(|item| ids.contains(item.id.as_str()))
        .collect())
}

/// BFS from `start` in `direction`, adding every reached node to `keep`.
fn collect_reachable(
    graph: &DepGraph,
    start: NodeIndex,
    direction: Direction,
    keep: &mut HashSet<NodeIndex>,
) {
    let mut frontier = vec![start];
    while let Some(node) = frontier.pop() {
        for next in graph.graph.neighbors_directed(node, direction) {
            if keep.insert(next) {
                frontier.push(next);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

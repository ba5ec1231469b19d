//! Dependency graph construction from a snapshot.
//!
//! # Edge Direction
//!
//! An edge `A → B` means "B depends on A" — A must be completed before B can
//! start. Edges are added only when *both* endpoints exist in the snapshot;
//! a dependency id absent from the snapshot contributes no edge and no error
//! (it is treated as already satisfied).

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::instrument;

use crate::snapshot::Snapshot;

/// A directed dependency graph over work-item ids.
///
/// Nodes are item ids (strings); an edge `A → B` means "A is a dependency of
/// B". The id → [`NodeIndex`] map is built once so lookups never scan.
///
/// Cycles in the input are preserved as-is; analyses that need acyclicity
/// guard against them explicitly (see [`crate::graph::depth`]).
#[derive(Debug)]
pub struct DepGraph {
    /// Directed graph: nodes = item ids, edges = dependency → dependent.
    pub graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DepGraph {
    /// Build the graph for every item in `snapshot`.
    ///
    /// Every item becomes a node, including items with no dependencies, so
    /// downstream analyses see the full node set. Duplicate dependency
    /// listings collapse to one edge.
    #[instrument(skip(snapshot), fields(items = snapshot.len()))]
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::with_capacity(snapshot.len());

        for item in snapshot.items() {
            let idx = graph.add_node(item.id.clone());
            node_map.insert(item.id.clone(), idx);
        }

        for item in snapshot.items() {
            let dependent = node_map[&item.id];
            for dep in &item.dependencies {
                let Some(&dependency) = node_map.get(dep) else {
                    continue; // absent dependency: satisfied, no edge
                };
                if !graph.contains_edge(dependency, dependent) {
                    graph.add_edge(dependency, dependent, ());
                }
            }
        }

        Self { graph, node_map }
    }

    /// Number of nodes (items).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the node for an item id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// The item id at a node.
    #[must_use]
    pub fn item_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Ids of the item's dependencies that exist in the snapshot.
    #[must_use]
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors_directed(idx, Direction::Incoming).collect()
    }

    /// Ids of items that directly depend on this one.
    #[must_use]
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors_directed(idx, Direction::Outgoing).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkItem;

    fn item(id: &str, deps: &[&str]) -> WorkItem {
        let mut item = WorkItem::new(id, format!("Item {id}"));
        item.dependencies = deps.iter().map(ToString::to_string).collect();
        item
    }

    fn snapshot(items: Vec<WorkItem>) -> Snapshot {
        Snapshot::new(items).expect("unique ids")
    }

    #[test]
    fn empty_snapshot_empty_graph() {
        let graph = DepGraph::from_snapshot(&snapshot(vec![]));
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn edge_runs_dependency_to_dependent() {
        let graph = DepGraph::from_snapshot(&snapshot(vec![
            item("a", &[]),
            item("b", &["a"]),
        ]));
        let a = graph.node_index("a").unwrap();
        let b = graph.node_index("b").unwrap();
        assert!(graph.graph.contains_edge(a, b), "expected a → b");
        assert!(!graph.graph.contains_edge(b, a), "no reverse edge");
    }

    #[test]
    fn absent_dependency_adds_no_edge() {
        let graph = DepGraph::from_snapshot(&snapshot(vec![item("a", &["ghost"])]));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.node_index("ghost").is_none());
    }

    #[test]
    fn duplicate_dependency_listing_collapses() {
        let graph = DepGraph::from_snapshot(&snapshot(vec![
            item("a", &[]),
            item("b", &["a", "a"]),
        ]));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn neighbor_accessors() {
        let graph = DepGraph::from_snapshot(&snapshot(vec![
            item("a", &[]),
            item("b", &["a"]),
            item("c", &["a"]),
        ]));
        let a = graph.node_index("a").unwrap();
        let b = graph.node_index("b").unwrap();

        assert_eq!(graph.dependents_of(a).len(), 2);
        assert_eq!(graph.dependencies_of(b), vec![a]);
        assert_eq!(graph.item_id(a), Some("a"));
    }

    #[test]
    fn cycles_are_preserved_in_raw_graph() {
        let graph = DepGraph::from_snapshot(&snapshot(vec![
            item("a", &["b"]),
            item("b", &["a"]),
        ]));
        assert_eq!(graph.edge_count(), 2);
    }
}

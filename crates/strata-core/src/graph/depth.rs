//! Dependency depth with explicit cycle guarding.
//!
//! # Definition
//!
//! `depth(item) = 0` when the item has no dependencies present in the
//! snapshot; otherwise `1 + max(depth(d))` over its present dependencies.
//!
//! # Cycle Guard
//!
//! The intended input is a DAG, but typo'd or adversarial stores can submit
//! cycles, and a naive recursion would blow the stack. Depths here are
//! computed iteratively with a three-state visit marker (unvisited /
//! in-progress / done). When resolving an item's depth reaches a dependency
//! that is still in-progress, that edge is treated as absent — the cycle is
//! broken deterministically — and the item's depth is tagged
//! [`Depth::CycleBroken`] so callers can surface the condition.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::NodeIndex;
use tracing::{instrument, warn};

use crate::graph::build::DepGraph;

/// Depth of one item, tagged with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Every dependency edge participated.
    Computed(usize),
    /// At least one edge was dropped to break a dependency cycle.
    CycleBroken(usize),
}

impl Depth {
    /// The numeric depth regardless of tag.
    #[must_use]
    pub const fn value(self) -> usize {
        match self {
            Self::Computed(d) | Self::CycleBroken(d) => d,
        }
    }

    /// `true` when a cycle was broken while computing this depth.
    #[must_use]
    pub const fn is_cycle_broken(self) -> bool {
        matches!(self, Self::CycleBroken(_))
    }
}

/// Memoized depths for every item in a graph.
#[derive(Debug, Clone, Default)]
pub struct DepthAnalysis {
    depths: HashMap<String, Depth>,
    cycle_members: BTreeSet<String>,
}

enum Visit {
    Enter(NodeIndex),
    Exit(NodeIndex),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    InProgress,
    Done,
}

impl DepthAnalysis {
    /// Compute depths for every node in `graph`.
    ///
    /// Runs in O(nodes + edges); never recurses, so arbitrarily deep or
    /// cyclic graphs cannot overflow the stack.
    #[instrument(skip(graph), fields(nodes = graph.node_count()))]
    #[must_use]
    pub fn compute(graph: &DepGraph) -> Self {
        let mut states: HashMap<NodeIndex, State> = HashMap::with_capacity(graph.node_count());
        let mut depths: HashMap<NodeIndex, Depth> = HashMap::with_capacity(graph.node_count());
        let mut cycle_members: BTreeSet<String> = BTreeSet::new();

        for start in graph.graph.node_indices() {
            if states.get(&start) == Some(&State::Done) {
                continue;
            }

            let mut stack = vec![Visit::Enter(start)];
            while let Some(visit) = stack.pop() {
                match visit {
                    Visit::Enter(node) => {
                        if states.contains_key(&node) {
                            // Done: memoized. InProgress: an ancestor; the
                            // dependent resolves the cycle at its Exit.
                            continue;
                        }
                        states.insert(node, State::InProgress);
                        stack.push(Visit::Exit(node));
                        for dep in graph.dependencies_of(node) {
                            if !states.contains_key(&dep) {
                                stack.push(Visit::Enter(dep));
                            }
                        }
                    }
                    Visit::Exit(node) => {
                        let mut max_dep_depth: Option<usize> = None;
                        let mut broke_cycle = false;

                        for dep in graph.dependencies_of(node) {
                            match states.get(&dep) {
                                Some(State::Done) => {
                                    let d = depths[&dep].value();
                                    max_dep_depth =
                                        Some(max_dep_depth.map_or(d, |m| m.max(d)));
                                }
                                // Still in progress: this edge closes a cycle.
                                // Treat it as absent.
                                _ => {
                                    broke_cycle = true;
                                    if let Some(id) = graph.item_id(dep) {
                                        cycle_members.insert(id.to_string());
                                    }
                                    if let Some(id) = graph.item_id(node) {
                                        cycle_members.insert(id.to_string());
                                    }
                                }
                            }
                        }

                        let depth = max_dep_depth.map_or(0, |m| m + 1);
                        let tagged = if broke_cycle {
                            Depth::CycleBroken(depth)
                        } else {
                            Depth::Computed(depth)
                        };
                        depths.insert(node, tagged);
                        states.insert(node, State::Done);
                    }
                }
            }
        }

        if !cycle_members.is_empty() {
            warn!(
                members = ?cycle_members,
                "dependency cycle detected; offending edges ignored"
            );
        }

        let depths = depths
            .into_iter()
            .filter_map(|(idx, depth)| {
                graph.item_id(idx).map(|id| (id.to_string(), depth))
            })
            .collect();

        Self {
            depths,
            cycle_members,
        }
    }

    /// Depth of an item, if it is known to this analysis.
    #[must_use]
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.depths.get(id).map(|d| d.value())
    }

    /// The tagged depth of an item.
    #[must_use]
    pub fn tagged(&self, id: &str) -> Option<Depth> {
        self.depths.get(id).copied()
    }

    /// Largest depth across all items; 0 for an empty graph.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.depths.values().map(|d| d.value()).max().unwrap_or(0)
    }

    /// `true` when any cycle was broken during computation.
    #[must_use]
    pub fn cycle_detected(&self) -> bool {
        !self.cycle_members.is_empty()
    }

    /// Ids involved in broken cycles, sorted.
    #[must_use]
    pub fn cycle_members(&self) -> impl Iterator<Item = &str> {
        self.cycle_members.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

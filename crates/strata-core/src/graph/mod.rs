//! Dependency-graph analysis over a snapshot.
//!
//! All operations here are stateless pure functions: they take a
//! [`crate::snapshot::Snapshot`] (and values derived from it) and return new
//! values. The intended input is a DAG, but every algorithm terminates with
//! deterministic results on cyclic input — see [`depth`] for the cycle guard
//! the rest of the analyses inherit.

pub mod bottlenecks;
pub mod build;
pub mod critical_path;
pub mod depth;
pub mod levels;
pub mod neighborhood;
pub mod stats;

pub use bottlenecks::{Bottleneck, bottlenecks};
pub use build::DepGraph;
pub use critical_path::{CriticalPath, critical_path};
pub use depth::{Depth, DepthAnalysis};
pub use levels::{LevelSummary, TimelineProjection, levels, timeline};
pub use neighborhood::neighborhood;
pub use stats::Stats;

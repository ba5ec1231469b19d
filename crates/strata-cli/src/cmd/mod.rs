//! Command handlers for the `st` binary.

pub mod graph;
pub mod next;

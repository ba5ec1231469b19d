#![forbid(unsafe_code)]
//! strata-core: work-item dependency graph, scheduling, and rendering engine.
//!
//! Every operation takes an immutable snapshot of work items and returns a
//! derived value — nothing here mutates the underlying store or performs
//! I/O (see [`ports`] for the injected collaborators).
//!
//! # Conventions
//!
//! - **Errors**: structured `thiserror` enums in [`error`]; `Result` with
//!   `?` propagation, no panicking paths outside tests.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`), `#[instrument]` on
//!   load and graph-construction entry points.

pub mod error;
pub mod graph;
pub mod model;
pub mod ports;
pub mod render;
pub mod schedule;
pub mod snapshot;

pub use error::{CommandError, Error, FileOperationError, ValidationError};
pub use model::{Kind, Priority, Status, WorkItem};
pub use snapshot::{ItemFilter, Snapshot, parse_items};

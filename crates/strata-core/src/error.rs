//! Structured error types for the engine.
//!
//! Three distinct kinds, matching the three ways a call into strata can go
//! wrong:
//!
//! - [`ValidationError`] — the *content* handed to the engine is malformed
//!   (non-record item, missing `id`, blank focus id, empty graph text).
//! - [`FileOperationError`] — the input *channel* failed (unreadable or
//!   unparsable snapshot document). Raised by loaders, not by the engine.
//! - [`CommandError`] — the external graph renderer failed (binary missing,
//!   non-zero exit, timeout).
//!
//! Missing dependency ids and absent focus targets are **not** errors — they
//! resolve to "nothing found" or an omitted edge.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed input detected by the engine itself.
///
/// Raised at the point of detection; never silently corrected.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The snapshot root is not a collection of records.
    #[error("work item source must be an array or id-keyed object, got {found}")]
    NotACollection {
        /// JSON type name of the offending root value.
        found: &'static str,
    },

    /// An element of the collection is not an object.
    #[error("record {index} is not a work item record (found {found})")]
    NonRecordItem {
        /// Zero-based position within the source collection.
        index: usize,
        /// JSON type name of the offending element.
        found: &'static str,
    },

    /// A record lacks a required field.
    #[error("record {index} is missing required field `{field}`")]
    MissingField {
        /// Zero-based position within the source collection.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A record has an `id` but could not be decoded.
    #[error("record `{id}` is malformed: {reason}")]
    InvalidRecord {
        /// The record's `id` field.
        id: String,
        /// Decoder message describing the problem.
        reason: String,
    },

    /// Two records in one snapshot share an id.
    #[error("duplicate work item id `{id}`")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// A neighborhood focus id was empty or all whitespace.
    #[error("focus id must be a non-empty string")]
    EmptyFocusId,

    /// Graph-description text submitted for image rendering was blank.
    #[error("graph description is empty; nothing to render")]
    EmptyGraphText,
}

/// Failure reading or parsing the external work-item store.
#[derive(Debug, Error)]
pub enum FileOperationError {
    /// The snapshot document could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot document is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// External graph-renderer failure, with enough detail to diagnose.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The renderer binary was not found on `PATH`.
    #[error("renderer `{tool}` not found; install graphviz or adjust PATH")]
    NotFound {
        /// Name of the binary that was invoked.
        tool: String,
    },

    /// The renderer ran but exited non-zero.
    #[error("renderer `{tool}` exited with status {code}: {stderr}")]
    NonZeroExit {
        /// Name of the binary that was invoked.
        tool: String,
        /// Captured exit code (`-1` when terminated by a signal).
        code: i32,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// The renderer did not finish within the configured deadline.
    #[error("renderer `{tool}` timed out after {timeout_secs}s")]
    Timeout {
        /// Name of the binary that was invoked.
        tool: String,
        /// The deadline that was exceeded, in seconds.
        timeout_secs: u64,
    },
}

/// Any engine error, for callers that funnel all three kinds to one boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    FileOperation(#[from] FileOperationError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// JSON type name for error messages.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

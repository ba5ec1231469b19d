//! JSON snapshot loading.
//!
//! The store is a JSON document — an array of work-item records or an
//! object keyed by id — owned by an external system. This loader is the
//! CLI-side implementation of the engine's [`ItemSource`] port: the path
//! comes in through `--file`, never from state baked into business logic.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use strata_core::error::{Error, FileOperationError};
use strata_core::model::WorkItem;
use strata_core::ports::ItemSource;
use strata_core::snapshot::parse_items;

/// Loads work items from a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ItemSource for JsonFileSource {
    fn load(&self) -> Result<Vec<WorkItem>, Error> {
        let text = fs::read_to_string(&self.path).map_err(|source| FileOperationError::Read {
            path: self.path.clone(),
            source,
        })?;

        let root: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| FileOperationError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let items = parse_items(&root)?;
        debug!(path = %self.path.display(), count = items.len(), "loaded snapshot");
        Ok(items)
    }
}

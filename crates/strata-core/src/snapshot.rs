//! Snapshot loading and filtering.
//!
//! # Overview
//!
//! A [`Snapshot`] is an immutable list of work items plus an id → position
//! index built once, so analyses never re-scan the list per lookup. The
//! engine reads snapshots; it never writes the underlying store.
//!
//! [`parse_items`] decodes the raw JSON handed over by a loader (the engine
//! itself performs no I/O — see [`crate::ports::ItemSource`]). Two root
//! shapes are accepted: an array of records, or an object keyed by id in
//! document order.
//!
//! # Filtering
//!
//! [`ItemFilter`] narrows a snapshot by status, kind, or milestone. Completed
//! items are excluded by default and kept only when `include_completed` is
//! set or the status filter explicitly asks for them. Filtering always
//! preserves original relative order.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ValidationError, json_type_name};
use crate::model::{Kind, Status, WorkItem};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// An immutable set of work items with an id index.
///
/// Construction rejects duplicate ids: the store owns id uniqueness, but the
/// engine must never silently merge two records.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    items: Vec<WorkItem>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    /// Build a snapshot from an ordered item list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateId`] when two items share an id.
    pub fn new(items: Vec<WorkItem>) -> Result<Self, ValidationError> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(ValidationError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Self { items, index })
    }

    /// All items, in original relative order.
    #[must_use]
    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorkItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// `true` if the id is present in this snapshot.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Original position of an item, used for insertion-order tie-breaks.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the snapshot holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Decode work-item records from a parsed snapshot document.
///
/// Accepts a JSON array of records or an object keyed by id; the object form
/// preserves document order. Each record must be an object carrying a string
/// `id`; everything else defaults.
///
/// # Errors
///
/// - [`ValidationError::NotACollection`] when the root is neither array nor
///   object.
/// - [`ValidationError::NonRecordItem`] when an element is not an object.
/// - [`ValidationError::MissingField`] when a record has no string `id`.
/// - [`ValidationError::InvalidRecord`] when a record fails to decode.
#[instrument(skip(root))]
pub fn parse_items(root: &Value) -> Result<Vec<WorkItem>, ValidationError> {
    let records: Vec<&Value> = match root {
        Value::Array(entries) => entries.iter().collect(),
        Value::Object(map) => map.values().collect(),
        other => {
            return Err(ValidationError::NotACollection {
                found: json_type_name(other),
            });
        }
    };

    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(ValidationError::NonRecordItem {
                index,
                found: json_type_name(record),
            });
        };

        let Some(id) = fields.get("id").and_then(Value::as_str) else {
            return Err(ValidationError::MissingField { index, field: "id" });
        };

        let item: WorkItem = serde_json::from_value(record.clone()).map_err(|err| {
            ValidationError::InvalidRecord {
                id: id.to_string(),
                reason: err.to_string(),
            }
        })?;
        items.push(item);
    }

    debug!(count = items.len(), "parsed work item records");
    Ok(items)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Snapshot narrowing criteria.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub status: Option<Status>,
    pub kind: Option<Kind>,
    pub milestone: Option<String>,
    /// Keep completed items even without an explicit `status` filter.
    pub include_completed: bool,
}

impl ItemFilter {
    /// `true` if the item passes every configured criterion.
    #[must_use]
    pub fn matches(&self, item: &WorkItem) -> bool {
        if item.status == Status::Completed
            && !self.include_completed
            && self.status != Some(Status::Completed)
        {
            return false;
        }
        if self.status.is_some_and(|status| item.status != status) {
            return false;
        }
        if self.kind.is_some_and(|kind| item.kind != kind) {
            return false;
        }
        if let Some(milestone) = &self.milestone {
            if item.milestone.as_deref() != Some(milestone.as_str()) {
                return false;
            }
        }
        true
    }

    /// Apply the filter, preserving original relative order.
    #[must_use]
    pub fn apply(&self, items: &[WorkItem]) -> Vec<WorkItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

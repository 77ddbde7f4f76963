//! Snapshot - the persisted layout of a photo store.
//!
//! A snapshot is the whole store as one JSON array of photo objects
//! (`id`, `name`, `path`, `sourceRef`, `sort`, `isHidden`). File-backed
//! stores read and write it as a unit.

use crate::{error::Result, Catalog, Error, PhotoRecord};
use serde::{Deserialize, Serialize};

/// A point-in-time copy of every persisted record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreSnapshot {
    records: Vec<PhotoRecord>,
}

impl StoreSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Snapshot a list of records, ordered by id.
    pub fn from_records(records: impl IntoIterator<Item = PhotoRecord>) -> Self {
        let mut records: Vec<_> = records.into_iter().collect();
        records.sort_by_key(|r| r.id);
        Self { records }
    }

    /// Records in the snapshot.
    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    /// Consume the snapshot.
    pub fn into_records(self) -> Vec<PhotoRecord> {
        self.records
    }

    /// Count records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build a catalog, rejecting repeated ids.
    pub fn to_catalog(&self) -> Result<Catalog> {
        Catalog::from_records(self.records.iter().cloned())
    }

    /// Validate integrity: ids must be unique.
    pub fn validate(&self) -> Result<()> {
        self.to_catalog().map(|_| ()).map_err(|e| match e {
            Error::DuplicateId(id) => Error::InvalidSnapshot(format!("duplicate id {}", id)),
            other => other,
        })
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize and validate.
    ///
    /// A blank document is an empty snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::new());
        }
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

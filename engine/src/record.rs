//! Photo records - the entity the ordering engine moves around.

use crate::{PhotoId, SortValue};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Sort value meaning "unassigned / pending placement".
pub const UNASSIGNED_SORT: SortValue = 0;

/// Where a record came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Discovered on the device and persisted in the local store
    #[default]
    Local,
    /// Fetched from the remote account, never persisted
    Remote,
}

impl Origin {
    /// Whether this is the local origin.
    pub fn is_local(&self) -> bool {
        matches!(self, Origin::Local)
    }
}

/// A photo in the collection.
///
/// Two records are equal when their ids are equal: the id is the join key
/// between the store and the live enumeration, the remaining fields are
/// state attached to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Identifier assigned by the originating source
    pub id: PhotoId,
    /// Display name
    pub name: String,
    /// Location of the photo inside its source
    pub path: String,
    /// Reference the renderer loads the image from
    pub source_ref: String,
    /// Display position, `0` while unassigned
    pub sort: SortValue,
    /// Excluded from the visible view, still holds its sort slot
    pub is_hidden: bool,
    /// Not a persisted column; only remote records carry it on the wire
    #[serde(default, skip_serializing_if = "Origin::is_local")]
    pub origin: Origin,
}

impl PhotoRecord {
    /// Create an unplaced, visible, local record.
    pub fn new(
        id: PhotoId,
        name: impl Into<String>,
        path: impl Into<String>,
        source_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            source_ref: source_ref.into(),
            sort: UNASSIGNED_SORT,
            is_hidden: false,
            origin: Origin::Local,
        }
    }

    /// Set the sort value (builder style).
    pub fn with_sort(mut self, sort: SortValue) -> Self {
        self.sort = sort;
        self
    }

    /// Whether the record holds a real position.
    pub fn is_placed(&self) -> bool {
        self.sort > UNASSIGNED_SORT
    }

    /// Whether the record lives in the local store.
    pub fn is_local(&self) -> bool {
        self.origin.is_local()
    }
}

impl PartialEq for PhotoRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhotoRecord {}

impl Hash for PhotoRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

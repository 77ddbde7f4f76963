//! The unified list handed to the presentation layer.

use crate::PhotoRecord;
use serde::Serialize;

/// Local photos newest-position first, then remote photos in source order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedList {
    local: Vec<PhotoRecord>,
    remote: Vec<PhotoRecord>,
}

impl UnifiedList {
    /// Merge a local and a remote part.
    ///
    /// The local part is sorted descending by sort value (ties by id); the
    /// remote part keeps its order.
    pub fn new(local: Vec<PhotoRecord>, remote: Vec<PhotoRecord>) -> Self {
        Self {
            local: sort_descending(local),
            remote,
        }
    }

    /// Same remote part, new local part.
    pub fn with_local(&self, local: Vec<PhotoRecord>) -> Self {
        Self::new(local, self.remote.clone())
    }

    /// Local records, descending by sort.
    pub fn local(&self) -> &[PhotoRecord] {
        &self.local
    }

    /// Remote records, in source order.
    pub fn remote(&self) -> &[PhotoRecord] {
        &self.remote
    }

    /// Every record, hidden ones included.
    pub fn iter(&self) -> impl Iterator<Item = &PhotoRecord> {
        self.local.iter().chain(self.remote.iter())
    }

    /// Records to render.
    pub fn visible(&self) -> impl Iterator<Item = &PhotoRecord> {
        self.iter().filter(|r| !r.is_hidden)
    }

    pub fn len(&self) -> usize {
        self.local.len() + self.remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }
}

fn sort_descending(mut records: Vec<PhotoRecord>) -> Vec<PhotoRecord> {
    records.sort_by(|a, b| b.sort.cmp(&a.sort).then(a.id.cmp(&b.id)));
    records
}

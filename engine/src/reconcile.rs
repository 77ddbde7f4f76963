//! Reconciliation of the persisted order against a live enumeration.
//!
//! This is the refresh pass that keeps the catalog in step with what the
//! device actually holds.
//!
//! # Algorithm
//!
//! 1. Place every discovered record, in discovery order
//! 2. Drop every stored record the enumeration no longer contains
//! 3. Compact sort values back to `1..=len`
//!
//! The pass runs against an in-memory [`Catalog`], so the caller persists
//! the outcome as one write.

use crate::{error::Result, Catalog, PhotoId, PhotoRecord, Placement};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    /// Records seen for the first time
    pub inserted: Vec<PhotoId>,
    /// Known records that were still unplaced and got a position
    pub reassigned: Vec<PhotoId>,
    /// Stored records missing from the enumeration
    pub removed: Vec<PhotoId>,
    /// Whether compaction renumbered anything
    pub compacted: bool,
}

impl ReconcileResult {
    /// Whether the catalog differs from before the pass.
    pub fn changed(&self) -> bool {
        !self.inserted.is_empty()
            || !self.reassigned.is_empty()
            || !self.removed.is_empty()
            || self.compacted
    }
}

/// Runs a reconciliation pass over a catalog.
pub struct Reconciler<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler over a catalog.
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self { catalog }
    }

    /// Bring the catalog in line with the discovered records.
    ///
    /// A repeated id in `discovered` is placed once, at its first
    /// occurrence. Fails when a new record cannot be given a position; the
    /// catalog is then partly updated and must not be persisted.
    pub fn reconcile(self, discovered: Vec<PhotoRecord>) -> Result<ReconcileResult> {
        let mut result = ReconcileResult::default();
        let mut live_ids = HashSet::with_capacity(discovered.len());

        for record in discovered {
            let id = record.id;
            if !live_ids.insert(id) {
                continue;
            }
            match self.catalog.assign_initial_sort(record)? {
                Placement::Inserted(_) => result.inserted.push(id),
                Placement::Reassigned(_) => result.reassigned.push(id),
                Placement::AlreadyPlaced(_) => {}
            }
        }

        result.removed = self.catalog.reconcile(&live_ids);
        result.compacted = self.catalog.compact();
        Ok(result)
    }
}

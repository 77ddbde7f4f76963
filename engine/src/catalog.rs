//! Catalog - the in-memory photo set and the ordering algorithms.
//!
//! Every algorithm mutates the catalog in memory and reports whether it
//! changed anything. Persisting the result is the caller's job, which keeps
//! a multi-record shift a single unit: compute the whole new set here, then
//! write it out in one go.
//!
//! # Sort invariants
//!
//! - Positive sort values are unique within a catalog.
//! - `0` marks a record that has not been placed yet.
//! - After [`Catalog::compact`] the sort values are exactly `1..=len`,
//!   in the previous relative order (ties broken by id).

use crate::{
    error::Result, record::UNASSIGNED_SORT, Error, PhotoId, PhotoRecord, SortValue,
};
use std::collections::{BTreeMap, HashSet};

/// Outcome of [`Catalog::assign_initial_sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The record was new and got appended at this sort value
    Inserted(SortValue),
    /// The record existed unplaced and got appended at this sort value
    Reassigned(SortValue),
    /// The record existed with a position; nothing changed
    AlreadyPlaced(SortValue),
}

impl Placement {
    /// Whether the catalog changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Placement::AlreadyPlaced(_))
    }

    /// The record's sort value after placement.
    pub fn sort(&self) -> SortValue {
        match *self {
            Placement::Inserted(sort)
            | Placement::Reassigned(sort)
            | Placement::AlreadyPlaced(sort) => sort,
        }
    }
}

/// An ordered set of local photo records, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<PhotoId, PhotoRecord>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Build a catalog from persisted records.
    ///
    /// Fails on a repeated id; the id is the join key and must be unique.
    pub fn from_records(records: impl IntoIterator<Item = PhotoRecord>) -> Result<Self> {
        let mut catalog = Self::new();
        for record in records {
            let id = record.id;
            if catalog.records.insert(id, record).is_some() {
                return Err(Error::DuplicateId(id));
            }
        }
        Ok(catalog)
    }

    /// Get a record by id.
    pub fn get(&self, id: PhotoId) -> Option<&PhotoRecord> {
        self.records.get(&id)
    }

    /// Number of records, hidden ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in id order.
    pub fn records(&self) -> impl Iterator<Item = &PhotoRecord> {
        self.records.values()
    }

    /// Consume the catalog, returning records in id order.
    pub fn into_records(self) -> Vec<PhotoRecord> {
        self.records.into_values().collect()
    }

    /// Records ascending by sort, ties by id.
    pub fn ordered(&self) -> Vec<&PhotoRecord> {
        let mut ordered: Vec<_> = self.records.values().collect();
        ordered.sort_by_key(|r| (r.sort, r.id));
        ordered
    }

    /// Highest sort value in use, `0` when nothing is placed.
    pub fn max_sort(&self) -> SortValue {
        self.records
            .values()
            .map(|r| r.sort)
            .max()
            .unwrap_or(UNASSIGNED_SORT)
            .max(UNASSIGNED_SORT)
    }

    /// The record currently at a sort position.
    pub fn find_by_sort(&self, sort: SortValue) -> Option<&PhotoRecord> {
        self.records.values().find(|r| r.sort == sort)
    }

    fn id_at(&self, sort: SortValue) -> Option<PhotoId> {
        self.find_by_sort(sort).map(|r| r.id)
    }

    /// Positive sort values held by more than one record, ascending.
    ///
    /// Empty for a healthy catalog; [`Catalog::compact`] heals any it finds.
    pub fn duplicate_sorts(&self) -> Vec<SortValue> {
        let mut counts: BTreeMap<SortValue, usize> = BTreeMap::new();
        for record in self.records.values().filter(|r| r.is_placed()) {
            *counts.entry(record.sort).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(sort, _)| sort)
            .collect()
    }

    fn next_sort(&self) -> Result<SortValue> {
        let max = self.max_sort();
        max.checked_add(1).ok_or(Error::SortOverflow(max))
    }

    /// Give a newly observed record a position at the end.
    ///
    /// A known record keeps its position unless it is still unplaced.
    /// Descriptive fields of a known record are left untouched. Fails only
    /// when the highest sort value leaves no room to append.
    pub fn assign_initial_sort(&mut self, record: PhotoRecord) -> Result<Placement> {
        match self.records.get(&record.id).map(|r| r.sort) {
            Some(sort) if sort > UNASSIGNED_SORT => Ok(Placement::AlreadyPlaced(sort)),
            Some(_) => {
                let next = self.next_sort()?;
                if let Some(existing) = self.records.get_mut(&record.id) {
                    existing.sort = next;
                }
                Ok(Placement::Reassigned(next))
            }
            None => {
                let next = self.next_sort()?;
                let mut record = record;
                record.sort = next;
                self.records.insert(record.id, record);
                Ok(Placement::Inserted(next))
            }
        }
    }

    /// Exchange the positions of the records at two sort values.
    ///
    /// No other record moves. A missing position makes this a no-op.
    pub fn swap(&mut self, selected: SortValue, target: SortValue) -> bool {
        let (Some(a), Some(b)) = (self.id_at(selected), self.id_at(target)) else {
            return false;
        };
        if a == b {
            return false;
        }

        if let Some(record) = self.records.get_mut(&a) {
            record.sort = target;
        }
        if let Some(record) = self.records.get_mut(&b) {
            record.sort = selected;
        }
        true
    }

    /// Move the record at `selected` to `target`, shifting the range between
    /// them by one step.
    ///
    /// - `target < selected`: sorts in `[target, selected)` move up by one.
    /// - `target > selected`: sorts in `(selected, target]` move down by one.
    ///
    /// A `target` past the highest sort value lands on the last position.
    /// No-op when the positions are equal, when nothing sits at `selected`,
    /// or when `target` is not a placeable position.
    pub fn insert_at_sort(&mut self, selected: SortValue, target: SortValue) -> bool {
        if selected < 1 || target < 1 {
            return false;
        }
        let Some(selected_id) = self.id_at(selected) else {
            return false;
        };
        let target = target.min(self.max_sort());
        if selected == target {
            return false;
        }

        for record in self.records.values_mut() {
            if record.id == selected_id {
                record.sort = target;
            } else if target < selected && (target..selected).contains(&record.sort) {
                record.sort += 1;
            } else if target > selected && (selected + 1..=target).contains(&record.sort) {
                record.sort -= 1;
            }
        }
        true
    }

    /// Renumber sort values to `1..=len`, keeping relative order.
    pub fn compact(&mut self) -> bool {
        let order: Vec<PhotoId> = self.ordered().into_iter().map(|r| r.id).collect();

        let mut changed = false;
        for (index, id) in order.into_iter().enumerate() {
            let sort = index as SortValue + 1;
            if let Some(record) = self.records.get_mut(&id) {
                if record.sort != sort {
                    record.sort = sort;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Drop every record whose id is not in the live enumeration.
    ///
    /// Returns the removed ids in ascending order. Leaves gaps; run
    /// [`Catalog::compact`] afterwards.
    pub fn reconcile(&mut self, live_ids: &HashSet<PhotoId>) -> Vec<PhotoId> {
        let stale: Vec<PhotoId> = self
            .records
            .keys()
            .filter(|id| !live_ids.contains(id))
            .copied()
            .collect();

        for id in &stale {
            self.records.remove(id);
        }
        stale
    }

    /// Show or hide a record. Never touches any sort value.
    pub fn set_visibility(&mut self, id: PhotoId, hidden: bool) -> bool {
        match self.records.get_mut(&id) {
            Some(record) if record.is_hidden != hidden => {
                record.is_hidden = hidden;
                true
            }
            _ => false,
        }
    }
}

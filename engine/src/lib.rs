//! # GridMuse Engine
//!
//! A deterministic ordering engine for a photo gallery.
//!
//! The gallery shows photos discovered on the device, in an order the user
//! controls, followed by photos fetched from a remote account. This crate
//! owns the rules that keep the user's order consistent while photos come
//! and go between runs.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine never touches files, databases or the network
//! - **Deterministic**: same inputs always produce the same order
//! - **Whole-set updates**: every algorithm computes the complete new set in
//!   memory, so a store can persist it in one write
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`PhotoRecord`] has a stable id from its source, display fields, a
//! `sort` position and a hidden flag. Sort `0` means "not placed yet".
//! Hidden photos keep their position.
//!
//! ### Catalog
//!
//! The [`Catalog`] holds the local records and implements the ordering
//! algorithms:
//! - [`Catalog::assign_initial_sort`] - place a newly seen photo at the end
//! - [`Catalog::swap`] - exchange two positions
//! - [`Catalog::insert_at_sort`] - move one photo, shifting the rest by one
//! - [`Catalog::compact`] - renumber to `1..=N`
//! - [`Catalog::reconcile`] - drop photos that no longer exist
//!
//! ### Reconciliation
//!
//! The [`Reconciler`] runs the refresh pass (place, purge, compact) against
//! a fresh enumeration of the device.
//!
//! ### Unified list
//!
//! [`UnifiedList`] merges the local order with [`RemoteMedia`] mapped to
//! unplaced records.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridmuse_engine::{Catalog, PhotoRecord, Reconciler, UnifiedList};
//!
//! // 1. Reconcile a fresh enumeration into an empty catalog
//! let mut catalog = Catalog::new();
//! let discovered = vec![
//!     PhotoRecord::new(11, "a.jpg", "Pictures/", "file:///Pictures/a.jpg"),
//!     PhotoRecord::new(12, "b.jpg", "Pictures/", "file:///Pictures/b.jpg"),
//!     PhotoRecord::new(13, "c.jpg", "Pictures/", "file:///Pictures/c.jpg"),
//! ];
//! let result = Reconciler::new(&mut catalog).reconcile(discovered).unwrap();
//! assert_eq!(result.inserted, vec![11, 12, 13]);
//!
//! // 2. Move the last photo to the front
//! assert!(catalog.insert_at_sort(3, 1));
//! assert_eq!(catalog.find_by_sort(1).unwrap().id, 13);
//!
//! // 3. Build the list to render
//! let list = UnifiedList::new(catalog.into_records(), Vec::new());
//! let ids: Vec<_> = list.visible().map(|r| r.id).collect();
//! assert_eq!(ids, vec![12, 11, 13]);
//! ```
//!
//! ## Persistence
//!
//! [`StoreSnapshot`] is the persisted layout: a JSON array of records with
//! deterministic ordering.

pub mod catalog;
pub mod error;
pub mod operation;
pub mod reconcile;
pub mod record;
pub mod remote;
pub mod snapshot;
pub mod view;

// Re-export main types at crate root
pub use catalog::{Catalog, Placement};
pub use error::Error;
pub use operation::Command;
pub use reconcile::{ReconcileResult, Reconciler};
pub use record::{Origin, PhotoRecord, UNASSIGNED_SORT};
pub use remote::{MediaKind, RemoteMedia, BROKEN_IMAGE_REF, REMOTE_SENTINEL_ID};
pub use snapshot::StoreSnapshot;
pub use view::UnifiedList;

/// Type aliases for clarity
pub type PhotoId = i64;
pub type SortValue = i64;

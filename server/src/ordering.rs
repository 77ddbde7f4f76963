//! Ordering engine - serialized access to the photo store.
//!
//! Every mutation reads the full set, runs the catalog algorithm in memory
//! and writes the result back in a single store call. The gate keeps those
//! read-compute-write cycles from interleaving; readers share it and never
//! observe a half-applied shift.

use crate::store::{PhotoStore, StoreResult};
use gridmuse_engine::{
    Catalog, Command, PhotoId, PhotoRecord, Placement, ReconcileResult, Reconciler, SortValue,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// How a mutation is persisted.
enum Write {
    Nothing,
    One(PhotoId),
    All,
}

/// Single-writer front over a [`PhotoStore`].
pub struct OrderingEngine {
    store: Arc<dyn PhotoStore>,
    gate: RwLock<()>,
}

impl OrderingEngine {
    pub fn new(store: Arc<dyn PhotoStore>) -> Self {
        Self {
            store,
            gate: RwLock::new(()),
        }
    }

    /// Name of the underlying backend.
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Every persisted record.
    pub async fn load_all(&self) -> StoreResult<Vec<PhotoRecord>> {
        let _guard = self.gate.read().await;
        self.store.load_all().await
    }

    pub async fn get_by_id(&self, id: PhotoId) -> StoreResult<Option<PhotoRecord>> {
        let _guard = self.gate.read().await;
        self.store.get_by_id(id).await
    }

    /// Place a newly observed record at the end of the order.
    pub async fn assign_initial_sort(&self, record: PhotoRecord) -> StoreResult<Placement> {
        let id = record.id;
        self.mutate("assign_initial_sort", |catalog| {
            let placement = catalog.assign_initial_sort(record)?;
            let write = if placement.changed() {
                Write::One(id)
            } else {
                Write::Nothing
            };
            Ok((placement, write))
        })
        .await
    }

    /// Exchange the records at two sort positions.
    pub async fn swap(&self, selected: SortValue, target: SortValue) -> StoreResult<bool> {
        self.mutate("swap", |catalog| {
            let changed = catalog.swap(selected, target);
            Ok((changed, if changed { Write::All } else { Write::Nothing }))
        })
        .await
    }

    /// Move the record at `selected` to `target`, shifting the range between.
    pub async fn insert_at_sort(&self, selected: SortValue, target: SortValue) -> StoreResult<bool> {
        self.mutate("insert_at_sort", |catalog| {
            let changed = catalog.insert_at_sort(selected, target);
            Ok((changed, if changed { Write::All } else { Write::Nothing }))
        })
        .await
    }

    /// Renumber to `1..=N`.
    pub async fn compact(&self) -> StoreResult<bool> {
        self.mutate("compact", |catalog| {
            let changed = catalog.compact();
            Ok((changed, if changed { Write::All } else { Write::Nothing }))
        })
        .await
    }

    /// Delete every record missing from `live_ids`. Returns the removed ids.
    pub async fn reconcile(&self, live_ids: &HashSet<PhotoId>) -> StoreResult<Vec<PhotoId>> {
        self.mutate("reconcile", |catalog| {
            let removed = catalog.reconcile(live_ids);
            let write = if removed.is_empty() {
                Write::Nothing
            } else {
                Write::All
            };
            Ok((removed, write))
        })
        .await
    }

    pub async fn set_visibility(&self, id: PhotoId, hidden: bool) -> StoreResult<bool> {
        self.mutate("set_visibility", |catalog| {
            let changed = catalog.set_visibility(id, hidden);
            Ok((changed, if changed { Write::One(id) } else { Write::Nothing }))
        })
        .await
    }

    /// Apply a user command.
    pub async fn apply(&self, command: Command) -> StoreResult<bool> {
        match command {
            Command::SetVisibility { photo_id, hidden } => self.set_visibility(photo_id, hidden).await,
            _ => {
                self.mutate(command.name(), |catalog| {
                    let changed = catalog.apply(&command);
                    Ok((changed, if changed { Write::All } else { Write::Nothing }))
                })
                .await
            }
        }
    }

    /// Place, purge and compact against a fresh enumeration, persisted as
    /// one write.
    pub async fn synchronize(&self, discovered: Vec<PhotoRecord>) -> StoreResult<ReconcileResult> {
        self.mutate("synchronize", |catalog| {
            let result = Reconciler::new(catalog).reconcile(discovered)?;
            let write = if result.changed() {
                Write::All
            } else {
                Write::Nothing
            };
            Ok((result, write))
        })
        .await
    }

    /// Delete every record.
    pub async fn clear(&self) -> StoreResult<()> {
        let _guard = self.gate.write().await;
        self.store.clear().await?;
        tracing::info!(backend = self.backend(), "Cleared photo store");
        Ok(())
    }

    async fn mutate<R, F>(&self, op: &'static str, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Catalog) -> gridmuse_engine::error::Result<(R, Write)>,
    {
        let _guard = self.gate.write().await;

        let mut catalog = Catalog::from_records(self.store.load_all().await?)?;
        let (outcome, write) = f(&mut catalog).map_err(|e| {
            tracing::error!(op, error = %e, "Photo set rejected, nothing persisted");
            e
        })?;

        let duplicates = catalog.duplicate_sorts();
        if !duplicates.is_empty() {
            tracing::warn!(op, ?duplicates, "Sort values not unique");
        }

        match write {
            Write::Nothing => {
                tracing::debug!(op, "No change");
            }
            Write::One(id) => {
                if let Some(record) = catalog.get(id) {
                    self.store.upsert(record).await?;
                    tracing::debug!(op, id, sort = record.sort, "Persisted record");
                }
            }
            Write::All => {
                let records = catalog.into_records();
                self.store.replace_all(&records).await?;
                tracing::debug!(op, records = records.len(), "Persisted photo set");
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, StoreError};

    async fn engine_with(sorts: &[(PhotoId, SortValue)]) -> (OrderingEngine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("photos.json")));
        let records: Vec<_> = sorts
            .iter()
            .map(|&(id, sort)| PhotoRecord::new(id, format!("{}.jpg", id), "DCIM/", "").with_sort(sort))
            .collect();
        store.replace_all(&records).await.unwrap();
        (OrderingEngine::new(store), dir)
    }

    async fn sorts(engine: &OrderingEngine) -> Vec<(PhotoId, SortValue)> {
        let mut pairs: Vec<_> = engine
            .load_all()
            .await
            .unwrap()
            .iter()
            .map(|r| (r.id, r.sort))
            .collect();
        pairs.sort();
        pairs
    }

    #[tokio::test]
    async fn insert_persists_whole_shift() {
        let (engine, _dir) = engine_with(&[(1, 1), (2, 2), (3, 3), (4, 4)]).await;

        assert!(engine.insert_at_sort(4, 1).await.unwrap());

        assert_eq!(sorts(&engine).await, vec![(1, 2), (2, 3), (3, 4), (4, 1)]);
    }

    #[tokio::test]
    async fn missing_positions_are_noops() {
        let (engine, _dir) = engine_with(&[(1, 1), (2, 2)]).await;

        assert!(!engine.swap(1, 9).await.unwrap());
        assert!(!engine.insert_at_sort(9, 1).await.unwrap());
        assert!(!engine.set_visibility(42, true).await.unwrap());

        assert_eq!(sorts(&engine).await, vec![(1, 1), (2, 2)]);
    }

    #[tokio::test]
    async fn reconcile_then_compact() {
        let (engine, _dir) = engine_with(&[(1, 1), (2, 2), (3, 3)]).await;

        let removed = engine.reconcile(&HashSet::from([1, 3])).await.unwrap();
        assert_eq!(removed, vec![2]);
        assert!(engine.compact().await.unwrap());

        assert_eq!(sorts(&engine).await, vec![(1, 1), (3, 2)]);
    }

    #[tokio::test]
    async fn assign_initial_sort_appends() {
        let (engine, _dir) = engine_with(&[(1, 1)]).await;

        let placement = engine
            .assign_initial_sort(PhotoRecord::new(5, "5.jpg", "DCIM/", ""))
            .await
            .unwrap();

        assert_eq!(placement, Placement::Inserted(2));
        assert_eq!(engine.get_by_id(5).await.unwrap().unwrap().sort, 2);
    }

    #[tokio::test]
    async fn insert_past_end_keeps_sync_working() {
        let (engine, _dir) = engine_with(&[(1, 1), (2, 2), (3, 3)]).await;

        assert!(engine.insert_at_sort(1, SortValue::MAX).await.unwrap());
        let discovered = (1..=4)
            .map(|id| PhotoRecord::new(id, format!("{}.jpg", id), "DCIM/", ""))
            .collect();
        let result = engine.synchronize(discovered).await.unwrap();

        assert_eq!(result.inserted, vec![4]);
        assert_eq!(sorts(&engine).await, vec![(1, 3), (2, 1), (3, 2), (4, 4)]);
    }

    #[tokio::test]
    async fn exhausted_sort_space_persists_nothing() {
        let (engine, _dir) = engine_with(&[(1, 1), (2, SortValue::MAX)]).await;

        let result = engine
            .assign_initial_sort(PhotoRecord::new(3, "3.jpg", "DCIM/", ""))
            .await;

        assert!(matches!(
            result,
            Err(StoreError::Corrupt(gridmuse_engine::Error::SortOverflow(SortValue::MAX)))
        ));
        assert_eq!(sorts(&engine).await, vec![(1, 1), (2, SortValue::MAX)]);
    }

    #[tokio::test]
    async fn concurrent_moves_stay_unique() {
        let (engine, _dir) = engine_with(&[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]).await;
        let engine = Arc::new(engine);

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let engine = engine.clone();
                tokio::spawn(async move {
                    let (s, t) = if i % 2 == 0 { (1, 5) } else { (4, 2) };
                    engine.insert_at_sort(s, t).await.unwrap();
                    engine.swap(2, 3).await.unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let mut values: Vec<_> = sorts(&engine).await.into_iter().map(|(_, s)| s).collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn apply_commands() {
        let (engine, _dir) = engine_with(&[(1, 1), (2, 2), (3, 3)]).await;

        engine
            .apply(Command::Swap {
                selected: 1,
                target: 3,
            })
            .await
            .unwrap();
        engine
            .apply(Command::SetVisibility {
                photo_id: 2,
                hidden: true,
            })
            .await
            .unwrap();

        assert_eq!(sorts(&engine).await, vec![(1, 3), (2, 2), (3, 1)]);
        assert!(engine.get_by_id(2).await.unwrap().unwrap().is_hidden);
    }
}

//! Collection service - refresh orchestration and the cached unified list.
//!
//! The cached list is only ever rebuilt by a refresh. Commands mutate the
//! store through the ordering engine and then run a partial refresh, which
//! reloads the local order and reuses the last remote part.

use crate::error::{AppError, Result};
use crate::ordering::OrderingEngine;
use crate::source::{LocalSource, RemoteSource};
use gridmuse_engine::{remote, Command, PhotoId, PhotoRecord, SortValue, UnifiedList};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Owns the ordering engine, the photo sources and the current list.
pub struct CollectionService {
    engine: OrderingEngine,
    local: Arc<dyn LocalSource>,
    remote: Option<Arc<dyn RemoteSource>>,
    cache: watch::Sender<Arc<UnifiedList>>,
    refresh_lock: Mutex<()>,
}

impl CollectionService {
    pub fn new(
        engine: OrderingEngine,
        local: Arc<dyn LocalSource>,
        remote: Option<Arc<dyn RemoteSource>>,
    ) -> Self {
        let (cache, _) = watch::channel(Arc::new(UnifiedList::default()));
        Self {
            engine,
            local,
            remote,
            cache,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &OrderingEngine {
        &self.engine
    }

    /// The last computed list. No I/O.
    pub fn current_list(&self) -> Arc<UnifiedList> {
        self.cache.borrow().clone()
    }

    /// Receive every rebuilt list.
    pub fn subscribe(&self) -> watch::Receiver<Arc<UnifiedList>> {
        self.cache.subscribe()
    }

    /// Rebuild the list.
    ///
    /// A full refresh re-enumerates the device and refetches the remote
    /// account concurrently, then reconciles the store. A partial refresh
    /// only reloads the store.
    pub async fn refresh(&self, full: bool) -> Result<Arc<UnifiedList>> {
        let _guard = self.refresh_lock.lock().await;
        self.rebuild(full).await
    }

    /// Exchange the photos at two sort positions.
    pub async fn swap_photos(&self, selected: SortValue, target: SortValue) -> Result<Arc<UnifiedList>> {
        self.execute(Command::Swap { selected, target }).await
    }

    /// Move the photo at `selected` to `target`.
    pub async fn insert_photo_at_sort(
        &self,
        selected: SortValue,
        target: SortValue,
    ) -> Result<Arc<UnifiedList>> {
        self.execute(Command::InsertAt { selected, target }).await
    }

    pub async fn set_visibility(&self, photo_id: PhotoId, hidden: bool) -> Result<Arc<UnifiedList>> {
        self.execute(Command::SetVisibility { photo_id, hidden }).await
    }

    /// Apply a command to the local store, then refresh partially.
    pub async fn execute(&self, command: Command) -> Result<Arc<UnifiedList>> {
        let _guard = self.refresh_lock.lock().await;

        match command {
            Command::Swap { selected, target } | Command::InsertAt { selected, target }
                if selected < 1 || target < 1 =>
            {
                // Unplaced and remote photos have no position to move.
                tracing::debug!(command = command.name(), selected, target, "Ignoring unplaced position");
                return Ok(self.current_list());
            }
            _ => {}
        }

        let changed = self.engine.apply(command).await?;
        tracing::info!(command = command.name(), changed, "Applied command");

        self.rebuild(false).await
    }

    /// Delete every stored photo and drop the local part of the list.
    pub async fn reset(&self) -> Result<Arc<UnifiedList>> {
        let _guard = self.refresh_lock.lock().await;

        self.engine.clear().await?;
        let list = Arc::new(self.current_list().with_local(Vec::new()));
        self.cache.send_replace(list.clone());
        Ok(list)
    }

    async fn rebuild(&self, full: bool) -> Result<Arc<UnifiedList>> {
        let remote = if full {
            let (discovered, remote) = tokio::join!(self.local.enumerate(), self.fetch_remote());

            let discovered = discovered.map_err(|e| {
                tracing::error!(error = %e, "Local enumeration failed");
                AppError::from(e)
            })?;
            let result = self.engine.synchronize(discovered).await?;
            tracing::info!(
                inserted = result.inserted.len(),
                reassigned = result.reassigned.len(),
                removed = result.removed.len(),
                compacted = result.compacted,
                "Synchronized local photos"
            );
            remote
        } else {
            self.current_list().remote().to_vec()
        };

        let local = self.engine.load_all().await?;
        let list = Arc::new(UnifiedList::new(local, remote));
        tracing::debug!(
            full,
            local = list.local().len(),
            remote = list.remote().len(),
            "Rebuilt photo list"
        );

        self.cache.send_replace(list.clone());
        Ok(list)
    }

    /// Remote records, or none when the fetch fails.
    async fn fetch_remote(&self) -> Vec<PhotoRecord> {
        let Some(source) = &self.remote else {
            return Vec::new();
        };
        match source.fetch().await {
            Ok(media) => remote::to_records(&media),
            Err(e) => {
                tracing::warn!(error = %e, "Remote fetch failed, continuing without remote photos");
                Vec::new()
            }
        }
    }
}

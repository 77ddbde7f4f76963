//! JSON file backend.
//!
//! The whole store is one JSON array. Writes go to a sibling temp file that
//! is renamed over the target, so a crash mid-write leaves the previous
//! file intact.

use super::{PhotoStore, StoreResult};
use async_trait::async_trait;
use gridmuse_engine::{PhotoId, PhotoRecord, StoreSnapshot};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Store backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store at `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> StoreResult<StoreSnapshot> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(StoreSnapshot::from_json(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreSnapshot::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, snapshot: &StoreSnapshot) -> StoreResult<()> {
        let json = snapshot.to_json_pretty()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::trace!(path = %self.path.display(), records = snapshot.len(), "Wrote store file");
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "json"
    }

    async fn load_all(&self) -> StoreResult<Vec<PhotoRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.into_records())
    }

    async fn get_by_id(&self, id: PhotoId) -> StoreResult<Option<PhotoRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read()
            .await?
            .into_records()
            .into_iter()
            .find(|r| r.id == id))
    }

    async fn upsert(&self, record: &PhotoRecord) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?.into_records();

        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                existing.sort = record.sort;
                existing.is_hidden = record.is_hidden;
            }
            None => records.push(record.clone()),
        }

        self.write(&StoreSnapshot::from_records(records)).await
    }

    async fn delete_by_id(&self, id: PhotoId) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?.into_records();

        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(());
        }

        self.write(&StoreSnapshot::from_records(records)).await
    }

    async fn clear(&self) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        self.write(&StoreSnapshot::new()).await
    }

    async fn replace_all(&self, records: &[PhotoRecord]) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let snapshot = StoreSnapshot::from_records(records.iter().cloned());
        snapshot.validate()?;
        self.write(&snapshot).await
    }
}

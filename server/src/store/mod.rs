//! Photo store - persistence of the local photo order.
//!
//! Every backend satisfies the same contract, so the ordering engine never
//! knows which one it runs on. Each operation is atomic with respect to the
//! whole collection: readers see the state before or after a write, never a
//! partial one.

mod json;
mod sqlite;

pub use json::JsonFileStore;
pub use sqlite::SqliteStore;

use crate::config::StoreConfig;
use async_trait::async_trait;
use gridmuse_engine::{PhotoId, PhotoRecord};
use std::sync::Arc;

/// Persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("corrupt store: {0}")]
    Corrupt(#[from] gridmuse_engine::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The logical store contract.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Every persisted record, in no particular order.
    async fn load_all(&self) -> StoreResult<Vec<PhotoRecord>>;

    /// A record by id.
    async fn get_by_id(&self, id: PhotoId) -> StoreResult<Option<PhotoRecord>>;

    /// Insert an unseen id; for a known id overwrite only `sort` and
    /// `is_hidden`.
    async fn upsert(&self, record: &PhotoRecord) -> StoreResult<()>;

    /// Delete a record. No-op if absent.
    async fn delete_by_id(&self, id: PhotoId) -> StoreResult<()>;

    /// Remove every record.
    async fn clear(&self) -> StoreResult<()>;

    /// Replace the whole set in one write. On failure the previous set
    /// stays in place.
    async fn replace_all(&self, records: &[PhotoRecord]) -> StoreResult<()>;
}

/// Open the backend named by the configuration.
pub async fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn PhotoStore>> {
    match config {
        StoreConfig::Json { path } => {
            tracing::info!(path = %path.display(), "Using JSON file store");
            Ok(Arc::new(JsonFileStore::new(path)))
        }
        StoreConfig::Sqlite { url } => {
            tracing::info!("Using SQLite store");
            Ok(Arc::new(SqliteStore::connect(url).await?))
        }
    }
}

//! SQLite backend.

use super::{PhotoStore, StoreResult};
use crate::db::{self, Pool};
use async_trait::async_trait;
use gridmuse_engine::{PhotoId, PhotoRecord};

/// Store backed by the `device_photos` table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool,
}

impl SqliteStore {
    /// Connect and bring the schema up to date.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = db::create_pool(database_url).await?;
        db::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
        Ok(Self { pool })
    }
}

#[async_trait]
impl PhotoStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn load_all(&self) -> StoreResult<Vec<PhotoRecord>> {
        let rows = db::get_all_photos(&self.pool).await?;
        Ok(rows.into_iter().map(db::StoredPhoto::into_record).collect())
    }

    async fn get_by_id(&self, id: PhotoId) -> StoreResult<Option<PhotoRecord>> {
        let row = db::get_photo(&self.pool, id).await?;
        Ok(row.map(db::StoredPhoto::into_record))
    }

    async fn upsert(&self, record: &PhotoRecord) -> StoreResult<()> {
        db::upsert_photo(&self.pool, record).await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: PhotoId) -> StoreResult<()> {
        db::delete_photo(&self.pool, id).await?;
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        db::delete_all_photos(&self.pool).await?;
        Ok(())
    }

    async fn replace_all(&self, records: &[PhotoRecord]) -> StoreResult<()> {
        db::replace_all_photos(&self.pool, records).await?;
        Ok(())
    }
}

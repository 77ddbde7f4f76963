//! Database operations for the device_photos table.

use gridmuse_engine::{Origin, PhotoId, PhotoRecord};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Executor, Row, SqlitePool};

/// A stored photo row from the database.
#[derive(Debug)]
pub struct StoredPhoto {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub source_ref: String,
    pub sort: i64,
    pub is_hidden: bool,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for StoredPhoto {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(StoredPhoto {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            path: row.try_get("path")?,
            source_ref: row.try_get("source_ref")?,
            sort: row.try_get("sort")?,
            is_hidden: row.try_get("is_hidden")?,
        })
    }
}

impl StoredPhoto {
    /// Convert database row to an engine record.
    pub fn into_record(self) -> PhotoRecord {
        PhotoRecord {
            id: self.id,
            name: self.name,
            path: self.path,
            source_ref: self.source_ref,
            sort: self.sort,
            is_hidden: self.is_hidden,
            origin: Origin::Local,
        }
    }
}

/// Get every stored photo.
pub async fn get_all_photos(pool: &SqlitePool) -> Result<Vec<StoredPhoto>, sqlx::Error> {
    sqlx::query_as::<_, StoredPhoto>(
        r#"
        SELECT id, name, path, source_ref, sort, is_hidden
        FROM device_photos
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Get a photo by id.
pub async fn get_photo(pool: &SqlitePool, id: PhotoId) -> Result<Option<StoredPhoto>, sqlx::Error> {
    sqlx::query_as::<_, StoredPhoto>(
        r#"
        SELECT id, name, path, source_ref, sort, is_hidden
        FROM device_photos
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Upsert a photo. An existing row only takes the new sort and hidden flag.
pub async fn upsert_photo<'e, E>(executor: E, record: &PhotoRecord) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO device_photos (id, name, path, source_ref, sort, is_hidden)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT (id) DO UPDATE SET
            sort = excluded.sort,
            is_hidden = excluded.is_hidden
        "#,
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.path)
    .bind(&record.source_ref)
    .bind(record.sort)
    .bind(record.is_hidden)
    .execute(executor)
    .await?;

    Ok(())
}

/// Insert a new photo row. Fails if the id exists.
pub async fn insert_photo<'e, E>(executor: E, record: &PhotoRecord) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO device_photos (id, name, path, source_ref, sort, is_hidden)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.path)
    .bind(&record.source_ref)
    .bind(record.sort)
    .bind(record.is_hidden)
    .execute(executor)
    .await?;

    Ok(())
}

/// Delete a photo by id.
pub async fn delete_photo<'e, E>(executor: E, id: PhotoId) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM device_photos WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Delete every photo.
pub async fn delete_all_photos<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM device_photos").execute(executor).await?;
    Ok(())
}

/// Replace the whole table in one transaction.
pub async fn replace_all_photos(
    pool: &SqlitePool,
    records: &[PhotoRecord],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    delete_all_photos(&mut *tx).await?;
    for record in records {
        insert_photo(&mut *tx, record).await?;
    }

    tx.commit().await
}

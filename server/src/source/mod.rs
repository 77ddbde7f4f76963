//! Photo sources - where the collection comes from.
//!
//! The local source is a complete snapshot of what exists on the device;
//! the remote source is a read-only feed from a photo account.

mod local;
mod remote;

pub use local::DirectorySource;
pub use remote::GraphApiSource;

use async_trait::async_trait;
use gridmuse_engine::{PhotoRecord, RemoteMedia};

/// Source failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("enumeration task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Enumerates the photos currently on the device.
#[async_trait]
pub trait LocalSource: Send + Sync {
    /// Every photo that exists right now, unplaced.
    async fn enumerate(&self) -> Result<Vec<PhotoRecord>, SourceError>;
}

/// Fetches the remote account's media.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// All media items, pagination already followed.
    async fn fetch(&self) -> Result<Vec<RemoteMedia>, SourceError>;
}

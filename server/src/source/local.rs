//! Local photo library on the filesystem.

use super::{LocalSource, SourceError};
use async_trait::async_trait;
use gridmuse_engine::{PhotoId, PhotoRecord};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use url::Url;
use walkdir::WalkDir;

/// File extensions treated as photos.
const PHOTO_EXTENSIONS: [&str; 10] = [
    "jpg", "jpeg", "png", "gif", "webp", "heic", "heif", "dng", "tif", "tiff",
];

/// Enumerates image files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    prefix: Option<String>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            prefix: None,
        }
    }

    /// Only enumerate below this path, relative to the root.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_matches('/');
        self.prefix = (!prefix.is_empty()).then(|| prefix.to_string());
        self
    }

    /// Stable id for a relative path. Always positive.
    pub fn stable_id(relative: &str) -> PhotoId {
        let digest = Sha256::digest(relative.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        ((u64::from_be_bytes(bytes) >> 1) as PhotoId).max(1)
    }

    fn scan(root: &Path, prefix: Option<&str>) -> Result<Vec<PhotoRecord>, SourceError> {
        let root = root.canonicalize().map_err(|e| {
            SourceError::Unavailable(format!("photo directory {}: {}", root.display(), e))
        })?;
        if !root.is_dir() {
            return Err(SourceError::Unavailable(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let start = match prefix {
            Some(prefix) => root.join(prefix),
            None => root.clone(),
        };
        if !start.is_dir() {
            tracing::debug!(path = %start.display(), "Photo folder missing, nothing to enumerate");
            return Ok(Vec::new());
        }

        let mut found: Vec<(SystemTime, String, PathBuf)> = Vec::new();
        for entry in WalkDir::new(&start).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    tracing::warn!(error = %e, "Skipping symlink loop");
                    continue;
                }
                // Never return a partial listing.
                Err(e) => {
                    return Err(SourceError::Unavailable(format!(
                        "scan of {} failed: {}",
                        start.display(),
                        e
                    )));
                }
            };
            if !entry.file_type().is_file() || !is_photo(entry.path()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((modified, relative, entry.into_path()));
        }

        found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        Ok(found
            .into_iter()
            .map(|(_, relative, absolute)| to_record(&relative, &absolute))
            .collect())
    }
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| PHOTO_EXTENSIONS.contains(&ext.as_str()))
}

fn to_record(relative: &str, absolute: &Path) -> PhotoRecord {
    let (dir, name) = match relative.rfind('/') {
        Some(i) => (&relative[..=i], &relative[i + 1..]),
        None => ("", relative),
    };
    let source_ref = Url::from_file_path(absolute)
        .map(String::from)
        .unwrap_or_else(|_| format!("file://{}", absolute.display()));

    PhotoRecord::new(DirectorySource::stable_id(relative), name, dir, source_ref)
}

#[async_trait]
impl LocalSource for DirectorySource {
    async fn enumerate(&self) -> Result<Vec<PhotoRecord>, SourceError> {
        let root = self.root.clone();
        let prefix = self.prefix.clone();

        let records =
            tokio::task::spawn_blocking(move || Self::scan(&root, prefix.as_deref())).await??;

        tracing::debug!(root = %self.root.display(), count = records.len(), "Enumerated local photos");
        Ok(records)
    }
}

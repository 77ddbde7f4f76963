//! Configuration management for the server.

use std::env;
use std::path::PathBuf;

/// Default Graph API endpoint for the remote source.
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://graph.instagram.com";

/// Default Graph API version.
pub const DEFAULT_REMOTE_API_VERSION: &str = "v21.0";

/// Which persistence backend holds the photo order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// One JSON array file
    Json { path: PathBuf },
    /// SQLite database
    Sqlite { url: String },
}

/// Credentials and endpoint for the remote photo account.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_version: String,
    pub user_id: String,
    pub access_token: String,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("user_id", &self.user_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Persistence backend
    pub store: StoreConfig,
    /// Root of the local photo library
    pub photo_dir: PathBuf,
    /// Only photos below this relative path are enumerated
    pub path_prefix: Option<String>,
    /// Remote account, disabled when absent
    pub remote: Option<RemoteConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let backend = var("STORE_BACKEND").unwrap_or_else(|| "json".to_string());
        let store = match backend.to_ascii_lowercase().as_str() {
            "json" => StoreConfig::Json {
                path: var("STORE_PATH")
                    .unwrap_or_else(|| "photo_data.json".to_string())
                    .into(),
            },
            "sqlite" => StoreConfig::Sqlite {
                url: var("DATABASE_URL").unwrap_or_else(|| "sqlite://gridmuse.db".to_string()),
            },
            _ => return Err(ConfigError::UnknownStoreBackend(backend)),
        };

        let photo_dir = var("PHOTO_DIR")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingPhotoDir)?;

        let path_prefix = var("PHOTO_PATH_PREFIX");

        let remote = match (var("REMOTE_USER_ID"), var("REMOTE_ACCESS_TOKEN")) {
            (Some(user_id), Some(access_token)) => Some(RemoteConfig {
                base_url: var("REMOTE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_REMOTE_BASE_URL.to_string()),
                api_version: var("REMOTE_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_REMOTE_API_VERSION.to_string()),
                user_id,
                access_token,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteRemote),
        };

        Ok(Self {
            host,
            port,
            store,
            photo_dir,
            path_prefix,
            remote,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PHOTO_DIR environment variable is required")]
    MissingPhotoDir,

    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Unknown STORE_BACKEND '{0}', expected 'json' or 'sqlite'")]
    UnknownStoreBackend(String),

    #[error("REMOTE_USER_ID and REMOTE_ACCESS_TOKEN must be set together")]
    IncompleteRemote,
}

//! Configuration Types

use crate::content_type::{ContentType, StaticRegistry};
use crate::store::FileStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Tool configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    /// Content types offered by the host, in display order
    #[serde(default)]
    pub content_types: Vec<ContentType>,
}

/// Settings store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Settings watcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("settings.toml"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(250),
        }
    }
}

impl Config {
    pub fn registry(&self) -> StaticRegistry {
        StaticRegistry::new(self.content_types.clone())
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.store.path)
    }
}

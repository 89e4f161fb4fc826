//! Configuration Manager

use super::Config;
use crate::content_type::ContentType;
use crate::Result;
use anyhow::{bail, Context};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Manages configuration loading and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Config> {
        if path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

            config
                .validate()
                .with_context(|| "Configuration validation failed")?;

            tracing::info!("Configuration loaded and validated successfully");
            Ok(config)
        } else {
            tracing::warn!(
                "Configuration file not found at {}, using defaults",
                path.display()
            );
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env() -> Result<Config> {
        let mut config = Config::default();

        if let Ok(store_path) = std::env::var("PAGER_SETTINGS_STORE_PATH") {
            config.store.path = PathBuf::from(store_path);
        }

        if let Ok(log_level) = std::env::var("PAGER_SETTINGS_LOG_LEVEL") {
            config.logging.level = log_level;
        }

        if let Ok(content_types) = std::env::var("PAGER_SETTINGS_CONTENT_TYPES") {
            config.content_types = Self::parse_content_types(&content_types)
                .with_context(|| format!("Invalid PAGER_SETTINGS_CONTENT_TYPES: {}", content_types))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse `type:Name,type2:Name 2`; a missing name falls back to the type
    pub fn parse_content_types(list: &str) -> Result<Vec<ContentType>> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (id, name) = entry.split_once(':').unwrap_or((entry, entry));
                ContentType::new(id.trim(), name.trim())
                    .with_context(|| format!("Invalid content type entry: {}", entry))
            })
            .collect()
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.validate_store_config()
            .with_context(|| "Store configuration validation failed")?;

        self.validate_logging_config()
            .with_context(|| "Logging configuration validation failed")?;

        self.validate_content_types()
            .with_context(|| "Content type configuration validation failed")?;

        Ok(())
    }

    fn validate_store_config(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            bail!("store.path must not be empty");
        }

        if self.store.path.is_dir() {
            bail!("store.path {} is a directory", self.store.path.display());
        }

        Ok(())
    }

    fn validate_logging_config(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "logging.level must be one of: {}",
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    fn validate_content_types(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for (i, content_type) in self.content_types.iter().enumerate() {
            if content_type.name.trim().is_empty() {
                bail!("Content type {} ('{}') has an empty name", i, content_type.id);
            }

            if !seen.insert(&content_type.id) {
                bail!("Content type '{}' is listed more than once", content_type.id);
            }
        }

        Ok(())
    }

    /// Merge with CLI arguments
    pub fn merge_with_cli_args(&mut self, store: Option<&Path>, log_level: Option<&str>) {
        if let Some(store) = store {
            self.store.path = store.to_path_buf();
            tracing::info!("CLI override: store path set to {}", store.display());
        }

        if let Some(log_level) = log_level {
            self.logging.level = log_level.to_string();
            tracing::info!("CLI override: log level set to {}", log_level);
        }
    }
}

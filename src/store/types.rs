//! Configuration Store Types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single stored configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl ConfigValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::String(_) => "string",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(value) => write!(f, "{}", value),
            ConfigValue::Integer(value) => write!(f, "{}", value),
            ConfigValue::String(value) => write!(f, "{:?}", value),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        ConfigValue::Integer(i64::from(value))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

/// All values of one namespace, keyed by flat key name
pub type FlatConfig = BTreeMap<String, ConfigValue>;

/// Pending writes for one namespace, committed together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigChanges {
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.values.iter()
    }

    /// Overwrite the given keys of `target`, leaving every other key intact
    pub fn apply_to(self, target: &mut FlatConfig) {
        target.extend(self.values);
    }
}

impl IntoIterator for ConfigChanges {
    type Item = (String, ConfigValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Configuration store failures; fatal for the operation that hit them
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize store contents: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("corrupt value for `{key}`: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("store lock poisoned")]
    Poisoned,
}

//! Configuration Store Module
//!
//! Key-value configuration storage, namespaced by config name. Writes are
//! buffered in a [`ConfigEditor`] and committed all-or-nothing.

pub mod file;
pub mod memory;
pub mod types;
pub mod watcher;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use types::{ConfigChanges, ConfigValue, FlatConfig, StoreError};
pub use watcher::{SettingsChangeEvent, SettingsWatcher};

use std::sync::Arc;

/// Namespaced key-value configuration storage
pub trait ConfigStore {
    /// Read every value stored under `namespace`; an unknown namespace is empty
    fn read(&self, namespace: &str) -> Result<FlatConfig, StoreError>;

    /// Overwrite the changed keys of `namespace` in one atomic write
    fn commit(&self, namespace: &str, changes: ConfigChanges) -> Result<(), StoreError>;

    fn get(&self, namespace: &str, key: &str) -> Result<Option<ConfigValue>, StoreError> {
        Ok(self.read(namespace)?.remove(key))
    }

    /// Start a batch of writes against `namespace`
    fn editable(&self, namespace: &str) -> ConfigEditor<'_, Self>
    where
        Self: Sized,
    {
        ConfigEditor::new(self, namespace)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn read(&self, namespace: &str) -> Result<FlatConfig, StoreError> {
        (**self).read(namespace)
    }

    fn commit(&self, namespace: &str, changes: ConfigChanges) -> Result<(), StoreError> {
        (**self).commit(namespace, changes)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn read(&self, namespace: &str) -> Result<FlatConfig, StoreError> {
        (**self).read(namespace)
    }

    fn commit(&self, namespace: &str, changes: ConfigChanges) -> Result<(), StoreError> {
        (**self).commit(namespace, changes)
    }
}

/// Buffers `set` calls until [`ConfigEditor::save`] commits them together
pub struct ConfigEditor<'a, S: ConfigStore> {
    store: &'a S,
    namespace: String,
    changes: ConfigChanges,
}

impl<'a, S: ConfigStore> ConfigEditor<'a, S> {
    pub fn new(store: &'a S, namespace: &str) -> Self {
        Self {
            store,
            namespace: namespace.to_string(),
            changes: ConfigChanges::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> &mut Self {
        self.changes.set(key, value);
        self
    }

    /// Commit all pending sets; returns how many keys were written
    pub fn save(self) -> Result<usize, StoreError> {
        let written = self.changes.len();
        if written == 0 {
            return Ok(0);
        }

        self.store.commit(&self.namespace, self.changes)?;
        tracing::debug!("Committed {} keys to {}", written, self.namespace);
        Ok(written)
    }
}

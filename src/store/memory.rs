//! In-memory configuration store

use super::{ConfigChanges, ConfigStore, FlatConfig, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Store held entirely in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespaces: RwLock<HashMap<String, FlatConfig>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a namespace with existing values
    pub fn with_namespace(self, namespace: &str, values: FlatConfig) -> Self {
        if let Ok(mut namespaces) = self.namespaces.write() {
            namespaces.insert(namespace.to_string(), values);
        }
        self
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self, namespace: &str) -> Result<FlatConfig, StoreError> {
        let namespaces = self.namespaces.read().map_err(|_| StoreError::Poisoned)?;
        Ok(namespaces.get(namespace).cloned().unwrap_or_default())
    }

    fn commit(&self, namespace: &str, changes: ConfigChanges) -> Result<(), StoreError> {
        let mut namespaces = self.namespaces.write().map_err(|_| StoreError::Poisoned)?;
        changes.apply_to(namespaces.entry(namespace.to_string()).or_default());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfigValue;

    #[test]
    fn test_commit_keeps_untouched_keys() {
        let mut seeded = FlatConfig::new();
        seeded.insert("old_key".to_string(), ConfigValue::Integer(4));
        let store = MemoryStore::new().with_namespace("demo", seeded);

        let mut changes = ConfigChanges::new();
        changes.set("new_key", "value");
        store.commit("demo", changes).unwrap();

        let values = store.read("demo").unwrap();
        assert_eq!(values.get("old_key"), Some(&ConfigValue::Integer(4)));
        assert_eq!(values.get("new_key"), Some(&ConfigValue::from("value")));
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let store = MemoryStore::new();
        let mut changes = ConfigChanges::new();
        changes.set("key", true);
        store.commit("first", changes).unwrap();

        assert!(store.read("second").unwrap().is_empty());
    }
}

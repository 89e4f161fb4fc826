//! File-backed configuration store
//!
//! The whole store is one TOML document with a table per namespace. Commits
//! rewrite the document through a uniquely named temp file in the same
//! directory that is renamed over the store file, so readers never observe a
//! half-written store and concurrent writers never share a temp file.

use super::{ConfigChanges, ConfigStore, FlatConfig, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type Document = BTreeMap<String, FlatConfig>;

/// Configuration store persisted as a TOML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load_document(&self) -> Result<Document, StoreError> {
        if !self.path.exists() {
            debug!("Store file {} does not exist, reading as empty", self.path.display());
            return Ok(Document::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        toml::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self, document: &Document) -> Result<(), StoreError> {
        let content = toml::to_string(document)?;

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
                parent
            }
            None => Path::new("."),
        };

        // Dropping the temp file on an error path removes it
        let mut temp = tempfile::Builder::new()
            .prefix(".pager-settings-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| self.io_error(e))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;

        temp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn read(&self, namespace: &str) -> Result<FlatConfig, StoreError> {
        let mut document = self.load_document()?;
        Ok(document.remove(namespace).unwrap_or_default())
    }

    fn commit(&self, namespace: &str, changes: ConfigChanges) -> Result<(), StoreError> {
        let mut document = self.load_document()?;
        let written = changes.len();
        changes.apply_to(document.entry(namespace.to_string()).or_default());
        self.write_document(&document)?;

        info!(
            "Saved {} keys of {} to {}",
            written,
            namespace,
            self.path.display()
        );
        Ok(())
    }
}

//! File-backed key-value store

use crate::kv::KvStore;
use crate::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key-value store persisted as a single JSON document on disk.
///
/// Every operation re-reads the file, so external changes between calls
/// are picked up. Writes are read-modify-write over the whole document;
/// there is no locking against other processes.
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    /// Open a store at the given file path, creating parent directories.
    /// The file itself is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_document(&self, doc: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        doc.insert(key.to_string(), value.to_string());
        self.write_document(&doc)?;
        tracing::debug!("Stored {} bytes under key {:?}", value.len(), key);
        Ok(())
    }
}

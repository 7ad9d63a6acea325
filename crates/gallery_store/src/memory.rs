//! In-memory key-value store

use crate::kv::KvStore;
use crate::Result;
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory store, used as a test double and for throwaway sessions.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Remove a key, simulating external deletion.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.lock().remove(key)
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_operations() {
        let store = MemoryKvStore::new();
        assert!(store.is_empty());

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.remove("a");
        assert!(store.get("a").unwrap().is_none());
    }
}

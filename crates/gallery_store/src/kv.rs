//! The injected key-value store capability

use crate::Result;

/// A flat, string-keyed persistent store.
///
/// This is the only contract the gallery relies on: `get` returns the
/// stored string or `None` when the key is absent, `set` overwrites it.
/// No transactionality is assumed beyond read-then-write within a single
/// operation; concurrent writers are last-writer-wins.
pub trait KvStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

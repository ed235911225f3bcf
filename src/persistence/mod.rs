//! Key/value persistence
//!
//! The game keeps a handful of JSON values under fixed keys. On the web they
//! live in LocalStorage; natively and in tests an in-memory map stands in.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage backend failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("failed to read `{0}`")]
    Read(String),

    #[error("failed to write `{0}`")]
    Write(String),
}

/// String key/value store
pub trait Store {
    /// Value under `key`, `Ok(None)` when unset
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Map-backed store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("highScore"), Ok(None));

        store.set("highScore", "12").expect("memory store write");
        assert_eq!(store.get("highScore"), Ok(Some("12".to_string())));

        store.set("highScore", "13").expect("memory store write");
        assert_eq!(store.get("highScore"), Ok(Some("13".to_string())));
        assert_eq!(store.len(), 1);
    }
}

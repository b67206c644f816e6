//! In-memory implementations of [`BlobStore`].
//!
//! [`InMemoryBlobStore`] is a first-class backend for tests and ephemeral
//! sessions. [`DetachedBlobStore`] stands in for a context with no medium at
//! all.

use std::collections::HashMap;

use crate::error::StorageError;
use crate::traits::BlobStore;

/// HashMap-backed medium.
///
/// Counts writes so callers can assert that a no-op mutation did not touch
/// the persisted blob.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBlobStore {
    blobs: HashMap<String, String>,
    writes: usize,
}

impl InMemoryBlobStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one blob.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.to_string(), blob.to_string());
        InMemoryBlobStore { blobs, writes: 0 }
    }

    /// Number of `set` calls since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Raw view of a stored blob.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// A medium that is not attached.
///
/// Reads return nothing and writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedBlobStore;

impl BlobStore for DetachedBlobStore {
    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut store = InMemoryBlobStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn detached_drops_writes() {
        let mut store = DetachedBlobStore;
        assert!(!store.is_available());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}

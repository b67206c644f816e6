//! The [`BlobStore`] trait: the persistence medium behind a script store.
//!
//! A medium maps a fixed key to one opaque string. It is read and rewritten
//! wholesale; there is no partial update. Backends are fully swappable
//! without changing [`ScriptStore`](crate::ScriptStore).

use crate::error::StorageError;

/// Key/value medium holding serialized blobs.
///
/// The trait is synchronous: every backend is local and the callers are
/// single-user.
pub trait BlobStore {
    /// Whether a medium is attached at all.
    ///
    /// A store without a medium (headless or pre-initialization contexts)
    /// lists nothing and persists nothing.
    fn is_available(&self) -> bool {
        true
    }

    /// Reads the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError>;
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        (**self).set(key, blob)
    }
}

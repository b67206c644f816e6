//! Storage for codeflow scripts.
//!
//! Provides the [`BlobStore`] trait, the injected key/value medium that holds
//! the serialized script collection, and [`ScriptStore`], which layers CRUD,
//! default seeding and backfill on top of any medium.
//!
//! # Architecture
//!
//! The storage layer has two levels:
//! - **Medium** backends ([`InMemoryBlobStore`], [`SqliteBlobStore`],
//!   [`DetachedBlobStore`]) only know how to read and write one string per key.
//! - **[`ScriptStore`]** reads the whole collection, modifies it, and writes
//!   it back on every mutation (last writer wins).
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: BlobStore trait definition
//! - [`memory`]: InMemoryBlobStore and DetachedBlobStore
//! - [`schema`]: SQL migrations and connection setup
//! - [`sqlite`]: SqliteBlobStore implementation
//! - [`scripts`]: ScriptStore

pub mod error;
pub mod memory;
pub mod schema;
pub mod scripts;
pub mod sqlite;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::{DetachedBlobStore, InMemoryBlobStore};
pub use scripts::{ScriptStore, STORAGE_KEY};
pub use sqlite::SqliteBlobStore;
pub use traits::BlobStore;

//! # Persistent Store
//!
//! A [`DocumentStore`] owns the single document that holds a whole collection.
//! It only knows two operations: load everything, save everything. Nothing
//! else in the framework touches the document.
//!
//! ## The Lost Update Hazard
//!
//! Every mutation is a read-modify-write of the *whole* document. Two cycles
//! that both `load` before either `save` compute against the same snapshot,
//! and whichever saves last silently discards the other's change:
//!
//! ```text
//! A: load [x]          A: save [x, a]
//! B:      load [x]                    B: save [x, b]   -> `a` is lost
//! ```
//!
//! A store provides no protection against this. Callers must run every
//! mutating cycle behind one mutual-exclusion boundary; in this crate that
//! boundary is the [`ResourceActor`](crate::ResourceActor) task, which
//! processes one mutation at a time.
//!
//! ## Atomic Saves
//!
//! `save` is all-or-nothing from the caller's point of view. Readers that load
//! concurrently with a save see either the previous document or the new one,
//! never a truncated mix. This is what lets reads bypass the actor.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::collection::Collection;
use crate::entity::ActorEntity;
use async_trait::async_trait;
use std::path::PathBuf;

/// Errors raised while reading or writing the persisted document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document could not be read or written.
    #[error("document {path} unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document was read but does not hold a valid collection.
    #[error("document {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Whole-document persistence for a collection of `T`.
#[async_trait]
pub trait DocumentStore<T: ActorEntity>: Send + Sync {
    /// Reads and decodes the entire collection.
    async fn load(&self) -> Result<Collection<T>, StoreError>;

    /// Encodes and atomically replaces the entire collection.
    async fn save(&self, collection: &Collection<T>) -> Result<(), StoreError>;
}

pub(crate) fn decode<T: ActorEntity>(
    path: &std::path::Path,
    bytes: &[u8],
) -> Result<Collection<T>, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn encode<T: ActorEntity>(collection: &Collection<T>) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(collection).map_err(StoreError::Encode)
}

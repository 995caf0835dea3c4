use super::{decode, encode, DocumentStore, StoreError};
use crate::collection::Collection;
use crate::entity::ActorEntity;
use async_trait::async_trait;
use std::path::Path;
use tokio::sync::RwLock;

/// A document held in memory, encoded exactly as the file store would write it.
///
/// Keeping the encoded bytes (rather than a typed collection) means every
/// load yields a fresh, independent collection, just like reading a file.
#[derive(Debug)]
pub struct MemoryStore {
    document: RwLock<Vec<u8>>,
}

impl MemoryStore {
    /// An empty collection.
    pub fn new() -> Self {
        Self::with_document(b"[]".to_vec())
    }

    /// Starts from the given raw document, which need not be valid.
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: RwLock::new(document.into()),
        }
    }

    /// A copy of the raw document as last saved.
    pub async fn document(&self) -> Vec<u8> {
        self.document.read().await.clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: ActorEntity> DocumentStore<T> for MemoryStore {
    async fn load(&self) -> Result<Collection<T>, StoreError> {
        let document = self.document.read().await;
        decode(Path::new("memory"), &document)
    }

    async fn save(&self, collection: &Collection<T>) -> Result<(), StoreError> {
        let bytes = encode(collection)?;
        *self.document.write().await = bytes;
        Ok(())
    }
}

use super::{decode, encode, DocumentStore, StoreError};
use crate::collection::Collection;
use crate::entity::ActorEntity;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// A collection persisted as one pretty-printed JSON array on disk.
///
/// Saves go through a sibling temp file:
/// 1. write the encoded collection to `.<name>.tmp`
/// 2. fsync the temp file
/// 3. rename it over the document
/// 4. fsync the parent directory (best effort)
///
/// A crash at any point leaves either the old or the new document in place.
/// The temp path is fixed, so at most one save may run at a time; the owning
/// actor guarantees that.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    temp_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection.json".to_string());
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));
        Self { path, temp_path }
    }

    /// Opens the document at `path`.
    ///
    /// With `init_if_missing`, an absent document is created holding an empty
    /// collection. Without it, an absent document is left alone and every
    /// load fails until one appears.
    pub async fn open(path: impl Into<PathBuf>, init_if_missing: bool) -> Result<Self, StoreError> {
        let store = Self::new(path);
        let exists = fs::try_exists(&store.path)
            .await
            .map_err(|source| store.unavailable(source))?;
        if !exists && init_if_missing {
            store.write_document(b"[]").await?;
            info!(path = %store.path.display(), "Initialized empty document");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }

    async fn write_document(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if let Err(source) = self.write_temp(bytes).await {
            let _ = fs::remove_file(&self.temp_path).await;
            return Err(self.unavailable(source));
        }

        fs::rename(&self.temp_path, &self.path)
            .await
            .map_err(|source| self.unavailable(source))?;

        // Make the rename itself durable.
        if let Some(parent) = self.path.parent() {
            if let Ok(dir) = fs::File::open(parent).await {
                let _ = dir.sync_all().await;
            }
        }
        Ok(())
    }

    async fn write_temp(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(&self.temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await
    }
}

#[async_trait]
impl<T: ActorEntity> DocumentStore<T> for JsonFileStore {
    async fn load(&self) -> Result<Collection<T>, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| self.unavailable(source))?;
        let collection = decode(&self.path, &bytes)?;
        debug!(path = %self.path.display(), size = collection.len(), "Loaded");
        Ok(collection)
    }

    async fn save(&self, collection: &Collection<T>) -> Result<(), StoreError> {
        let bytes = encode(collection)?;
        self.write_document(&bytes).await?;
        debug!(path = %self.path.display(), size = collection.len(), "Saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::tests::{note, Note};

    #[tokio::test]
    async fn open_initializes_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");

        let store = JsonFileStore::open(&path, true).await.unwrap();
        let notes: Collection<Note> = store.load().await.unwrap();
        assert!(notes.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn missing_document_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("notes.json"), false)
            .await
            .unwrap();

        let err = DocumentStore::<Note>::load(&store).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "[{\"id\": \"1\",").unwrap();

        let store = JsonFileStore::new(&path);
        let err = DocumentStore::<Note>::load(&store).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn save_replaces_whole_document_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let store = JsonFileStore::open(&path, true).await.unwrap();

        store
            .save(&Collection::from(vec![note("1", "a"), note("2", "b")]))
            .await
            .unwrap();
        store.save(&Collection::from(vec![note("2", "b")])).await.unwrap();

        let notes: Collection<Note> = store.load().await.unwrap();
        assert_eq!(notes.into_vec(), vec![note("2", "b")]);

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["notes.json".to_string()]);
    }

    #[tokio::test]
    async fn document_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let store = JsonFileStore::new(&path);

        store.save(&Collection::from(vec![note("1", "a")])).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  {\n    \"id\": \"1\",\n    \"text\": \"a\"\n  }\n]");
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        let store = JsonFileStore::new(&path);
        store.save(&Collection::from(vec![note("1", "a")])).await.unwrap();
        let before = std::fs::read(&path).unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(dir.path().join(".notes.json.tmp")).unwrap();
        let err = store
            .save(&Collection::from(vec![note("1", "a"), note("2", "b")]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Unavailable { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}

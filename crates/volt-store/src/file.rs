//! File-backed storage.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::backend::StorageBackend;
use crate::error::StorageError;

/// Storage backend keeping one JSON file per key under a root directory.
///
/// Keys are dotted identifiers like `cart.store.items` and map directly to
/// `<root>/<key>.json`. The root directory is created on first write.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        assert!(backend.read("cart.store.items").await.unwrap().is_none());

        backend
            .write("cart.store.items", b"[]".to_vec())
            .await
            .unwrap();
        assert_eq!(
            backend.read("cart.store.items").await.unwrap(),
            Some(b"[]".to_vec())
        );

        backend.remove("cart.store.items").await.unwrap();
        assert!(backend.read("cart.store.items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        backend.remove("never.written").await.unwrap();
    }

    #[tokio::test]
    async fn test_files_are_namespaced_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.write("a", b"1".to_vec()).await.unwrap();
        backend.write("b", b"2".to_vec()).await.unwrap();

        assert_eq!(backend.read("a").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(backend.read("b").await.unwrap(), Some(b"2".to_vec()));
    }
}

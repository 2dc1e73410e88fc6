//! Durable key-value storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::StorageError;

/// Durable key-value storage for store snapshots.
///
/// Each store writes its whole serialized collection under one fixed key.
/// Writes for a given key arrive strictly in order (the persistence worker
/// serializes them), so last-writer-wins is the only consistency a backend
/// needs to provide.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the blob stored under a key, `None` if absent.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a blob under a key, replacing any previous value.
    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Remove a key and its blob.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key with raw bytes, bypassing the store layer.
    pub fn seed(&self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.lock().insert(key.into(), bytes.into());
    }

    /// Snapshot the raw bytes currently held for a key.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert!(backend.read("k").await.unwrap().is_none());

        backend.write("k", b"value".to_vec()).await.unwrap();
        assert_eq!(backend.read("k").await.unwrap(), Some(b"value".to_vec()));

        backend.remove("k").await.unwrap();
        assert!(backend.read("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_backend_overwrites() {
        let backend = MemoryBackend::new();
        backend.write("k", b"one".to_vec()).await.unwrap();
        backend.write("k", b"two".to_vec()).await.unwrap();
        assert_eq!(backend.read("k").await.unwrap(), Some(b"two".to_vec()));
    }
}

//! In-memory object-store provider for tests and single-node dev use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use ticketdesk_core::error::AppError;
use ticketdesk_core::result::AppResult;
use ticketdesk_core::traits::ObjectStore;

/// In-memory object store backed by a path-keyed map.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    objects: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MemoryObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of stored payloads.
    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    /// Whether the store holds no payloads.
    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        self.objects.lock().await.insert(path.to_string(), data);
        Ok(())
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.objects
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Payload not found: {path}")))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        // Missing paths are fine: deletes stay idempotent under retry.
        self.objects.lock().await.remove(path);
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.objects.lock().await.contains_key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_delete() {
        let store = MemoryObjectStore::new();
        store.write("a/b.txt", Bytes::from("x")).await.unwrap();
        assert!(store.exists("a/b.txt").await.unwrap());
        assert_eq!(store.read_bytes("a/b.txt").await.unwrap(), Bytes::from("x"));

        store.delete("a/b.txt").await.unwrap();
        assert!(!store.exists("a/b.txt").await.unwrap());
        // Idempotent.
        store.delete("a/b.txt").await.unwrap();
    }
}

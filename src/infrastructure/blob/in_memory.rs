//! In-memory blob store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{BlobStore, DomainError};

/// Keeps blobs in a map; used by the memory storage backend and in tests
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().unwrap().is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<String, DomainError> {
        self.blobs
            .write()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(format!("/storage/{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryBlobStore::new();
        let url = store.put("logos/a.png", b"bytes").await.unwrap();

        assert_eq!(url, "/storage/logos/a.png");
        assert_eq!(store.get("logos/a.png"), Some(b"bytes".to_vec()));
        assert_eq!(store.len(), 1);
    }
}

//! Filesystem-backed blob store

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{BlobStore, DomainError};

/// Writes blobs under a local root directory and exposes them through a
/// public URL prefix (served as static files by a fronting web server).
///
/// A key `logos/<uuid>.png` lands at `<root>/logos/<uuid>.png` and is
/// returned as `<public_prefix>/logos/<uuid>.png`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into();
        Self {
            root: root.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    fn target_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        // Keys are generated internally but never trust them with the disk
        if key.split('/').any(|part| part.is_empty() || part == "..") {
            return Err(DomainError::storage(format!("Invalid blob key '{key}'")));
        }
        Ok(self.root.join(Path::new(key)))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<String, DomainError> {
        let path = self.target_path(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to create blob dir: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to write blob '{key}': {e}")))?;

        Ok(format!("{}/{}", self.public_prefix, key))
    }
}

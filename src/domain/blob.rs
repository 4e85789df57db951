//! Blob store trait

use async_trait::async_trait;

use crate::domain::DomainError;

/// Key-addressed binary storage returning a publicly reachable URL.
///
/// Keys are slash-separated paths such as `logos/<uuid>.png`; the returned URL
/// is what clients receive as `logoUrl`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Store raw bytes under the key and return the public URL
    async fn put(&self, key: &str, data: &[u8]) -> Result<String, DomainError>;
}

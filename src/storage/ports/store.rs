//! Blob store port.

use crate::storage::domain::BlobPath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Write access to the attachment bucket.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `contents` at `path`, replacing any existing blob.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Upload`] when the backend rejects the write.
    async fn put(&self, path: &BlobPath, contents: &[u8]) -> BlobStoreResult<()>;

    /// Returns the public URL a stored blob is served from.
    fn public_url(&self, path: &BlobPath) -> String;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// The path was not accepted by the backend.
    #[error("invalid blob path: {0}")]
    InvalidPath(String),

    /// The backend failed to store the blob.
    #[error("upload failed: {0}")]
    Upload(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a backend failure.
    pub fn upload(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upload(Arc::new(err))
    }
}

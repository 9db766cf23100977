//! In-memory blob store for tests and local development.

use crate::storage::{
    domain::BlobPath,
    ports::{BlobStore, BlobStoreError, BlobStoreResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory blob store.
#[derive(Debug, Clone)]
pub struct InMemoryBlobStore {
    public_base: String,
    blobs: Arc<RwLock<HashMap<BlobPath, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty store whose URLs start with `public_base`.
    #[must_use]
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into(),
            blobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns a copy of the blob stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Upload`] when the lock is poisoned.
    pub fn get(&self, path: &BlobPath) -> BlobStoreResult<Option<Vec<u8>>> {
        let guard = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::upload(std::io::Error::other(err.to_string())))?;
        Ok(guard.get(path).cloned())
    }

    /// Returns the number of stored blobs.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Upload`] when the lock is poisoned.
    pub fn blob_count(&self) -> BlobStoreResult<usize> {
        let guard = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::upload(std::io::Error::other(err.to_string())))?;
        Ok(guard.len())
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new("memory://activity-proofs")
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, path: &BlobPath, contents: &[u8]) -> BlobStoreResult<()> {
        let mut guard = self
            .blobs
            .write()
            .map_err(|err| BlobStoreError::upload(std::io::Error::other(err.to_string())))?;
        guard.insert(path.clone(), contents.to_vec());
        Ok(())
    }

    fn public_url(&self, path: &BlobPath) -> String {
        format!("{}/{path}", self.public_base.trim_end_matches('/'))
    }
}

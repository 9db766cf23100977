//! Blob store writing into a capability-scoped directory.
//!
//! The bucket directory is opened once; every write goes through that handle,
//! so paths cannot escape it even if validation were bypassed.

use crate::storage::{
    domain::BlobPath,
    ports::{BlobStore, BlobStoreError, BlobStoreResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;

/// Blob store backed by a local directory.
#[derive(Debug, Clone)]
pub struct FilesystemBlobStore {
    bucket_dir: Arc<Dir>,
    bucket: String,
    public_base: String,
}

impl FilesystemBlobStore {
    /// Opens (creating if needed) `bucket` under `root`.
    ///
    /// Public URLs take the form `{public_base}/{bucket}/{path}`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Upload`] when the directories cannot be
    /// created or opened, or [`BlobStoreError::InvalidPath`] when `bucket` is
    /// not a single path segment.
    pub fn open(
        root: &Utf8Path,
        bucket: impl Into<String>,
        public_base: impl Into<String>,
    ) -> BlobStoreResult<Self> {
        let bucket_name = bucket.into();
        if !crate::storage::domain::is_valid_segment(&bucket_name) || bucket_name.contains('/') {
            return Err(BlobStoreError::InvalidPath(bucket_name));
        }
        let root_dir =
            Dir::open_ambient_dir(root, ambient_authority()).map_err(BlobStoreError::upload)?;
        root_dir
            .create_dir_all(&bucket_name)
            .map_err(BlobStoreError::upload)?;
        let bucket_dir = root_dir
            .open_dir(&bucket_name)
            .map_err(BlobStoreError::upload)?;
        Ok(Self {
            bucket_dir: Arc::new(bucket_dir),
            bucket: bucket_name,
            public_base: public_base.into(),
        })
    }

    /// Reads a stored blob back.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Upload`] when the file cannot be read.
    pub async fn read(&self, path: &BlobPath) -> BlobStoreResult<Vec<u8>> {
        let dir = Arc::clone(&self.bucket_dir);
        let relative = path.as_str().to_owned();
        tokio::task::spawn_blocking(move || dir.read(relative))
            .await
            .map_err(BlobStoreError::upload)?
            .map_err(BlobStoreError::upload)
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(&self, path: &BlobPath, contents: &[u8]) -> BlobStoreResult<()> {
        let dir = Arc::clone(&self.bucket_dir);
        let parent = path.parent().map(str::to_owned);
        let relative = path.as_str().to_owned();
        let bytes = contents.to_vec();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            if let Some(parent_dir) = parent {
                dir.create_dir_all(parent_dir)?;
            }
            dir.write(relative, bytes)
        })
        .await
        .map_err(BlobStoreError::upload)?
        .map_err(BlobStoreError::upload)
    }

    fn public_url(&self, path: &BlobPath) -> String {
        format!(
            "{}/{}/{path}",
            self.public_base.trim_end_matches('/'),
            self.bucket
        )
    }
}

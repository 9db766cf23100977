//! Port contracts for blob storage.

mod store;

pub use store::{BlobStore, BlobStoreError, BlobStoreResult};

//! Adapter implementations for blob storage.

pub mod filesystem;
pub mod memory;

//! Blob storage for report attachments.
//!
//! Blobs live under validated, task-scoped relative paths inside a single
//! bucket and are served from a public base URL.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;

//! Unit tests for blob storage.

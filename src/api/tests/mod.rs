//! Unit tests for the caller-facing facade.

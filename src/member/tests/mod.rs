//! Unit tests for the member context.

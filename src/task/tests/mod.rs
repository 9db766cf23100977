//! Unit tests for the task context.

mod settlement_service_tests;
mod support;

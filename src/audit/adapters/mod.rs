//! Adapter implementations for audit ports.

pub mod memory;
pub mod postgres;

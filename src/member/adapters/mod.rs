//! Adapter implementations for member ports.

pub mod memory;
pub mod postgres;

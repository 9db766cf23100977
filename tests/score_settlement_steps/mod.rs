//! Step definitions for score settlement scenarios.

pub mod world;

mod given;
mod then;
mod when;

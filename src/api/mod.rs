//! Caller-facing facade.
//!
//! [`TeamboardApi`] resolves the caller through an
//! [`crate::identity::ports::IdentityProvider`], runs the requested service
//! operation, and reports the result as an [`ActionOutcome`]. No error escapes
//! as a panic or an `Err`: store and upload failures become failure outcomes.

mod facade;
mod outcome;

pub use facade::TeamboardApi;
pub use outcome::ActionOutcome;

#[cfg(test)]
mod tests;

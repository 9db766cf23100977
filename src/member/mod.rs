//! Team membership.
//!
//! Members are the participants who vote on, claim, report on, and review
//! tasks. The member count is the denominator used by review settlement.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;

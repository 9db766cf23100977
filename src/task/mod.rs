//! Tasks and their scoring.
//!
//! Members create tasks, claim them, vote on their point value, report
//! progress, and review each other's completed work. Votes sum to a task's
//! total; once every other member has reviewed, the total is scaled by the
//! review outcome to give the achieved score.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Application services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

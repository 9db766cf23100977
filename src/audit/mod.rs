//! Append-only audit trail of board actions.
//!
//! Every mutating operation records who did what to which task. Writing the
//! trail is best effort: a failed write is reported as a diagnostic and never
//! fails the operation that triggered it.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The best-effort writer in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

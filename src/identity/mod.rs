//! Caller identity.
//!
//! Services never consult ambient state to find out who is calling: the
//! [`Caller`] is passed explicitly into every operation. The
//! [`ports::IdentityProvider`] port is only used at the outer boundary to
//! resolve it.

mod caller;
pub mod adapters;
pub mod ports;

pub use caller::Caller;

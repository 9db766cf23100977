//! Adapter implementations for identity ports.

mod session;

pub use session::SessionIdentityProvider;

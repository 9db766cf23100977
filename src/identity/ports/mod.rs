//! Port contracts for identity resolution.

mod provider;

pub use provider::IdentityProvider;

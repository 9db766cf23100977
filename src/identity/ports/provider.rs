//! Identity provider port.

use crate::identity::Caller;
use async_trait::async_trait;

/// Resolves the identity of the current request.
///
/// Providers report a failed lookup as [`Caller::Anonymous`]; callers cannot
/// tell an expired session from a missing one.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current caller.
    async fn current_caller(&self) -> Caller;
}

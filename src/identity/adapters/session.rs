//! In-process identity provider holding a single signed-in member.

use crate::identity::{Caller, ports::IdentityProvider};
use crate::member::domain::MemberId;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Identity provider backed by an in-process session slot.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentityProvider {
    current: Arc<RwLock<Caller>>,
}

impl SessionIdentityProvider {
    /// Creates a provider with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a provider with `member` signed in.
    #[must_use]
    pub fn signed_in(member: MemberId) -> Self {
        Self {
            current: Arc::new(RwLock::new(Caller::Member(member))),
        }
    }

    /// Signs `member` in, replacing any previous session.
    pub fn sign_in(&self, member: MemberId) {
        self.replace(Caller::Member(member));
    }

    /// Ends the current session.
    pub fn sign_out(&self) {
        self.replace(Caller::Anonymous);
    }

    fn replace(&self, caller: Caller) {
        match self.current.write() {
            Ok(mut slot) => *slot = caller,
            Err(poisoned) => *poisoned.into_inner() = caller,
        }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentityProvider {
    async fn current_caller(&self) -> Caller {
        match self.current.read() {
            Ok(slot) => *slot,
            Err(_) => Caller::Anonymous,
        }
    }
}

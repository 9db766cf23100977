//! In-memory member repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::member::{
    domain::{Member, MemberId},
    ports::{MemberRepository, MemberRepositoryError, MemberRepositoryResult},
};

/// Thread-safe in-memory member repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
}

impl InMemoryMemberRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> MemberRepositoryError {
    MemberRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()> {
        let mut members = self.members.write().map_err(poisoned)?;
        if members.contains_key(&member.id()) {
            return Err(MemberRepositoryError::DuplicateMember(member.id()));
        }
        members.insert(member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>> {
        let members = self.members.read().map_err(poisoned)?;
        Ok(members.get(&id).cloned())
    }

    async fn list_by_name(&self) -> MemberRepositoryResult<Vec<Member>> {
        let members = self.members.read().map_err(poisoned)?;
        let mut listed: Vec<Member> = members.values().cloned().collect();
        listed.sort_by(|left, right| {
            left.name()
                .cmp(right.name())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(listed)
    }

    async fn count(&self) -> MemberRepositoryResult<u64> {
        let members = self.members.read().map_err(poisoned)?;
        u64::try_from(members.len()).map_err(MemberRepositoryError::persistence)
    }
}

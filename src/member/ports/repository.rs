//! Repository port for member persistence and team-size queries.

use crate::member::domain::{Member, MemberId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for member repository operations.
pub type MemberRepositoryResult<T> = Result<T, MemberRepositoryError>;

/// Member persistence contract.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Stores a new member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberRepositoryError::DuplicateMember`] when the member ID
    /// already exists.
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()>;

    /// Finds a member by identifier.
    ///
    /// Returns `None` when the member does not exist.
    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>>;

    /// Returns all members ordered by name.
    async fn list_by_name(&self) -> MemberRepositoryResult<Vec<Member>>;

    /// Returns the number of registered members.
    async fn count(&self) -> MemberRepositoryResult<u64>;
}

/// Errors returned by member repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MemberRepositoryError {
    /// A member with the same identifier already exists.
    #[error("duplicate member identifier: {0}")]
    DuplicateMember(MemberId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MemberRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

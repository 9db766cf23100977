//! Repository port for task votes.

use super::TaskRepositoryResult;
use crate::member::domain::MemberId;
use crate::task::domain::{Points, TaskId, Vote};
use async_trait::async_trait;

/// Vote persistence contract.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Inserts or replaces the (task, voter) vote and returns the sum of the
    /// task's votes as seen by the same atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn upsert_vote(&self, vote: &Vote) -> TaskRepositoryResult<Points>;

    /// Returns every vote on a task.
    async fn votes_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Vote>>;

    /// Returns every vote cast by a member.
    async fn votes_by_voter(&self, voter: MemberId) -> TaskRepositoryResult<Vec<Vote>>;
}

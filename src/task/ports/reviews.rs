//! Repository port for achievement reviews.

use super::TaskRepositoryResult;
use crate::member::domain::MemberId;
use crate::task::domain::{AchievementReview, TaskId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Review persistence contract.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts or replaces the (task, reviewer) review.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn upsert_review(&self, review: &AchievementReview) -> TaskRepositoryResult<()>;

    /// Returns every review of a task.
    async fn reviews_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<AchievementReview>>;

    /// Returns every review written by a member.
    async fn reviews_by_reviewer(
        &self,
        reviewer: MemberId,
    ) -> TaskRepositoryResult<Vec<AchievementReview>>;

    /// Returns the number of reviews per task; tasks without reviews are
    /// absent.
    async fn review_counts(&self) -> TaskRepositoryResult<HashMap<TaskId, u64>>;
}

//! The facade tying identity resolution to the task services.

use super::ActionOutcome;
use crate::audit::ports::AuditLogRepository;
use crate::identity::ports::IdentityProvider;
use crate::member::ports::MemberRepository;
use crate::storage::ports::BlobStore;
use crate::task::{
    domain::{Points, TaskId},
    ports::TaskStore,
    services::{
        ActivityFeedItem, ContributionSummary, ReportSubmission, TaskBoardEntry,
        TaskBoardService, TaskServiceResult, TaskUpdate,
    },
};
use mockable::Clock;
use std::sync::Arc;

/// Entry point for board actions on behalf of the current caller.
pub struct TeamboardApi<I, S, M, A, B, C>
where
    I: IdentityProvider,
    S: TaskStore,
    M: MemberRepository,
    A: AuditLogRepository,
    B: BlobStore,
    C: Clock + Send + Sync,
{
    identity: Arc<I>,
    board: TaskBoardService<S, M, A, B, C>,
}

impl<I, S, M, A, B, C> TeamboardApi<I, S, M, A, B, C>
where
    I: IdentityProvider,
    S: TaskStore,
    M: MemberRepository,
    A: AuditLogRepository,
    B: BlobStore,
    C: Clock + Send + Sync,
{
    /// Creates a facade over `board`.
    #[must_use]
    pub const fn new(identity: Arc<I>, board: TaskBoardService<S, M, A, B, C>) -> Self {
        Self { identity, board }
    }

    /// Returns the underlying board service.
    #[must_use]
    pub const fn service(&self) -> &TaskBoardService<S, M, A, B, C> {
        &self.board
    }

    /// Casts or replaces the caller's vote.
    pub async fn vote(&self, task_id: TaskId, score: Points) -> ActionOutcome {
        let caller = self.identity.current_caller().await;
        ActionOutcome::from_result(
            self.board
                .settlement()
                .record_vote(caller, task_id, score)
                .await,
        )
    }

    /// Submits or replaces the caller's review, given on the 0/2/3/5 scale.
    pub async fn review(&self, task_id: TaskId, score: u8) -> ActionOutcome {
        let caller = self.identity.current_caller().await;
        ActionOutcome::from_result(
            self.board
                .settlement()
                .record_review(caller, task_id, score)
                .await,
        )
    }

    /// Claims a task for the caller.
    pub async fn claim(&self, task_id: TaskId) -> ActionOutcome {
        let caller = self.identity.current_caller().await;
        ActionOutcome::from_result(self.board.claim_task(caller, task_id).await)
    }

    /// Submits an activity report.
    pub async fn submit_report(
        &self,
        task_id: TaskId,
        submission: ReportSubmission,
    ) -> ActionOutcome {
        let caller = self.identity.current_caller().await;
        ActionOutcome::from_result(self.board.submit_report(caller, task_id, submission).await)
    }

    /// Creates a task.
    pub async fn create_task(&self, title: String, description: Option<String>) -> ActionOutcome {
        let caller = self.identity.current_caller().await;
        ActionOutcome::from_result(self.board.create_task(caller, title, description).await)
    }

    /// Edits a task.
    pub async fn update_task(&self, task_id: TaskId, update: TaskUpdate) -> ActionOutcome {
        let caller = self.identity.current_caller().await;
        ActionOutcome::from_result(self.board.update_task(caller, task_id, update).await)
    }

    /// Deletes a task.
    pub async fn delete_task(&self, task_id: TaskId) -> ActionOutcome {
        let caller = self.identity.current_caller().await;
        ActionOutcome::from_result(self.board.delete_task(caller, task_id).await)
    }

    /// Returns the board as seen by the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskServiceError`](crate::task::services::TaskServiceError)
    /// when a lookup fails.
    pub async fn board(&self) -> TaskServiceResult<Vec<TaskBoardEntry>> {
        let caller = self.identity.current_caller().await;
        self.board.board(caller).await
    }

    /// Returns per-assignee contributions.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskServiceError`](crate::task::services::TaskServiceError)
    /// when a lookup fails.
    pub async fn contributions(&self) -> TaskServiceResult<ContributionSummary> {
        self.board.contributions().await
    }

    /// Returns the recent activity feed.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskServiceError`](crate::task::services::TaskServiceError)
    /// when the audit trail cannot be read.
    pub async fn recent_activity(&self) -> TaskServiceResult<Vec<ActivityFeedItem>> {
        self.board.recent_activity().await
    }
}

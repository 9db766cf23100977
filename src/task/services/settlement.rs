//! Vote and review recording with achieved-score settlement.

use super::{TaskServiceError, TaskServiceResult};
use crate::audit::{domain::AuditAction, ports::AuditLogRepository, services::AuditLogger};
use crate::identity::Caller;
use crate::member::ports::MemberRepository;
use crate::task::{
    domain::{
        AchievementReview, Points, ReviewScore, Settlement, Task, TaskId, Vote, VoteScore,
        settle_achievement,
    },
    ports::TaskStore,
};
use mockable::Clock;
use std::sync::Arc;

/// Records votes and reviews and keeps achieved scores settled.
pub struct ScoreSettlementService<S, M, A, C>
where
    S: TaskStore,
    M: MemberRepository,
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    members: Arc<M>,
    audit: AuditLogger<A, C>,
    clock: Arc<C>,
}

impl<S, M, A, C> ScoreSettlementService<S, M, A, C>
where
    S: TaskStore,
    M: MemberRepository,
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new settlement service.
    #[must_use]
    pub fn new(store: Arc<S>, members: Arc<M>, audit: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            store,
            members,
            audit: AuditLogger::new(audit, Arc::clone(&clock)),
            clock,
        }
    }

    /// Casts or replaces the caller's vote on a task.
    ///
    /// The task total becomes the sum of all votes, after which the achieved
    /// score is settled against the new total.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthenticated`] for anonymous callers,
    /// [`TaskServiceError::Domain`] when `score` is not a valid vote, and
    /// [`TaskServiceError::TaskNotFound`] when the task does not exist.
    pub async fn record_vote(
        &self,
        caller: Caller,
        task_id: TaskId,
        score: Points,
    ) -> TaskServiceResult<Task> {
        let voter = caller.member_id().ok_or(TaskServiceError::Unauthenticated)?;
        let vote_score = VoteScore::new(score)?;
        let mut task = self.require_task(task_id).await?;

        let vote = Vote::new(task_id, voter, vote_score, &*self.clock);
        let total = self.store.upsert_vote(&vote).await?;
        task.set_total_score(total, &*self.clock);
        self.store.update(&task).await?;

        self.settle(task).await
    }

    /// Submits or replaces the caller's peer review of a task.
    ///
    /// `score` is read on the 0/2/3/5 scale and is only validated once the
    /// caller is known to be an eligible reviewer.
    ///
    /// # Errors
    ///
    /// Checked in order: [`TaskServiceError::Unauthenticated`],
    /// [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::SelfReviewForbidden`] when the caller is the
    /// assignee, [`TaskServiceError::NoActivityYet`] when the task has no
    /// reports, and [`TaskServiceError::Domain`] for an off-scale score.
    pub async fn record_review(
        &self,
        caller: Caller,
        task_id: TaskId,
        score: impl Into<u8> + Send,
    ) -> TaskServiceResult<Task> {
        let raw_score = score.into();
        let reviewer = caller.member_id().ok_or(TaskServiceError::Unauthenticated)?;
        let task = self.require_task(task_id).await?;
        if task.is_assigned_to(reviewer) {
            return Err(TaskServiceError::SelfReviewForbidden(task_id));
        }
        if self.store.report_count(task_id).await? == 0 {
            return Err(TaskServiceError::NoActivityYet(task_id));
        }
        let review_score = ReviewScore::try_from(raw_score)?;

        let review = AchievementReview::new(task_id, reviewer, review_score, &*self.clock);
        self.store.upsert_review(&review).await?;
        self.audit
            .record(
                reviewer,
                AuditAction::Review,
                format!("Evaluated achievement with score {review_score}"),
                Some(task_id),
            )
            .await;

        self.settle(task).await
    }

    /// Re-evaluates the achieved score of a task from its current total and
    /// reviews.
    ///
    /// Safe to call any number of times; an achieved score is never cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, or a repository error when loading or saving fails.
    pub async fn recompute(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        let task = self.require_task(task_id).await?;
        self.settle(task).await
    }

    async fn settle(&self, mut task: Task) -> TaskServiceResult<Task> {
        let member_count = self.members.count().await?;
        let scores: Vec<ReviewScore> = self
            .store
            .reviews_for_task(task.id())
            .await?
            .iter()
            .map(AchievementReview::score)
            .collect();

        match settle_achievement(task.total_score(), member_count, &scores) {
            Settlement::Settled(achieved) => {
                tracing::debug!(task_id = %task.id(), %achieved, "task settled");
                if task.achieved_score() != Some(achieved) {
                    task.settle(achieved, &*self.clock);
                    self.store.update(&task).await?;
                }
            }
            Settlement::Pending { received, required } => {
                tracing::debug!(task_id = %task.id(), received, required, "reviews outstanding");
            }
            Settlement::Unreachable => {}
        }
        Ok(task)
    }

    async fn require_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }
}

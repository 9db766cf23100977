//! Tests for vote and review recording with settlement.

use std::sync::Arc;

use super::support::Harness;
use crate::audit::{
    domain::{AuditAction, AuditEntry},
    ports::{AuditLogError, AuditLogRepository, AuditLogResult},
};
use crate::identity::Caller;
use crate::member::adapters::memory::InMemoryMemberRepository;
use crate::storage::adapters::memory::InMemoryBlobStore;
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Points, ReviewScore, TaskDomainError, TaskId},
    ports::{ReviewRepository, TaskRepository, VoteRepository},
    services::{ErrorKind, ReportSubmission, TaskBoardService, TaskServiceError},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use rstest::rstest;

mock! {
    AuditLog {}

    #[async_trait]
    impl AuditLogRepository for AuditLog {
        async fn append(&self, entry: &AuditEntry) -> AuditLogResult<()>;
        async fn recent(&self, limit: usize) -> AuditLogResult<Vec<AuditEntry>>;
    }
}

const TEAM: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

async fn review_all(harness: &Harness, task_id: TaskId, scores: &[ReviewScore]) {
    for (offset, score) in scores.iter().enumerate() {
        harness
            .board
            .settlement()
            .record_review(harness.caller(offset + 1), task_id, *score)
            .await
            .expect("review recorded");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacing_a_vote_changes_the_total() {
    let harness = Harness::with_team(&TEAM).await;
    let task = harness.claimed_task("Vote target", 0).await;
    let settlement = harness.board.settlement();

    settlement
        .record_vote(harness.caller(1), task.id(), Points::whole(3))
        .await
        .expect("first vote");
    let updated = settlement
        .record_vote(harness.caller(1), task.id(), Points::whole(7))
        .await
        .expect("replacement vote");

    assert_eq!(updated.total_score(), Points::whole(7));
    let votes = harness.store.votes_for_task(task.id()).await.expect("votes");
    assert_eq!(votes.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn total_is_the_sum_of_all_votes_including_the_assignee() {
    let harness = Harness::with_team(&TEAM).await;
    let task = harness.claimed_task("Vote target", 0).await;
    let settlement = harness.board.settlement();

    for (member, halves) in [(0, 15), (1, 20), (2, 1)] {
        settlement
            .record_vote(harness.caller(member), task.id(), Points::from_halves(halves))
            .await
            .expect("vote recorded");
    }

    let stored = harness
        .store
        .find_by_id(task.id())
        .await
        .expect("lookup")
        .expect("task exists");
    assert_eq!(stored.total_score(), Points::from_halves(36));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_votes_are_rejected() {
    let harness = Harness::with_team(&TEAM).await;
    let task = harness.claimed_task("Vote target", 0).await;

    let result = harness
        .board
        .settlement()
        .record_vote(Caller::Anonymous, task.id(), Points::whole(3))
        .await;

    assert!(matches!(result, Err(TaskServiceError::Unauthenticated)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_votes_are_invalid_input() {
    let harness = Harness::with_team(&TEAM).await;

    let result = harness
        .board
        .settlement()
        .record_vote(harness.caller(1), TaskId::new(), Points::from_halves(21))
        .await;

    let err = result.expect_err("vote must be rejected");
    assert!(matches!(
        err,
        TaskServiceError::Domain(TaskDomainError::InvalidVoteScore(_))
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn votes_on_missing_tasks_are_not_found() {
    let harness = Harness::with_team(&TEAM).await;

    let err = harness
        .board
        .settlement()
        .record_vote(harness.caller(1), TaskId::new(), Points::whole(2))
        .await
        .expect_err("vote must be rejected");

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_cannot_review_own_task() {
    let harness = Harness::with_team(&TEAM).await;
    let task_id = harness.reviewable_task(10).await;

    let err = harness
        .board
        .settlement()
        .record_review(harness.caller(0), task_id, ReviewScore::Excellent)
        .await
        .expect_err("self review must be rejected");

    assert!(matches!(err, TaskServiceError::SelfReviewForbidden(id) if id == task_id));
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reviews_require_an_activity_report() {
    let harness = Harness::with_team(&TEAM).await;
    let task = harness.claimed_task("Quiet task", 0).await;

    let err = harness
        .board
        .settlement()
        .record_review(harness.caller(1), task.id(), ReviewScore::Satisfied)
        .await
        .expect_err("review must be rejected");

    assert!(matches!(err, TaskServiceError::NoActivityYet(_)));
    assert_eq!(err.kind(), ErrorKind::Precondition);
    let reviews = harness.store.reviews_for_task(task.id()).await.expect("reviews");
    assert!(reviews.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_review_fails_before_lookup() {
    let harness = Harness::with_team(&TEAM).await;

    let err = harness
        .board
        .settlement()
        .record_review(Caller::Anonymous, TaskId::new(), ReviewScore::Satisfied)
        .await
        .expect_err("review must be rejected");

    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn achieved_score_stays_unset_until_all_reviews_arrive() {
    let harness = Harness::with_team(&TEAM).await;
    let task_id = harness.reviewable_task(100).await;

    review_all(&harness, task_id, &[ReviewScore::Excellent, ReviewScore::Excellent]).await;

    let task = harness.board.get_task(task_id).await.expect("task");
    assert_eq!(task.achieved_score(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn final_review_settles_and_total_edits_resettle() {
    let harness = Harness::with_team(&TEAM).await;
    let task_id = harness.reviewable_task(100).await;

    review_all(
        &harness,
        task_id,
        &[
            ReviewScore::Excellent,
            ReviewScore::Excellent,
            ReviewScore::Satisfied,
        ],
    )
    .await;
    let settled = harness.board.get_task(task_id).await.expect("task");
    assert_eq!(settled.achieved_score(), Some(Points::whole(87)));

    let resettled = harness
        .board
        .update_task(
            harness.caller(0),
            task_id,
            crate::task::services::TaskUpdate::new().with_total_score(Points::whole(120)),
        )
        .await
        .expect("total edited");
    assert_eq!(resettled.achieved_score(), Some(Points::whole(104)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacing_a_review_resettles() {
    let harness = Harness::with_team(&["Alice", "Bob"]).await;
    let task_id = harness.reviewable_task(10).await;
    let settlement = harness.board.settlement();

    settlement
        .record_review(harness.caller(1), task_id, ReviewScore::Excellent)
        .await
        .expect("review");
    let updated = settlement
        .record_review(harness.caller(1), task_id, ReviewScore::NotSatisfied)
        .await
        .expect("replacement review");

    assert_eq!(updated.achieved_score(), Some(Points::whole(4)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revoting_after_settlement_rescales_achieved() {
    let harness = Harness::with_team(&["Alice", "Bob"]).await;
    let task = harness.claimed_task("Rescaled work", 0).await;
    let settlement = harness.board.settlement();
    settlement
        .record_vote(harness.caller(1), task.id(), Points::whole(10))
        .await
        .expect("vote");
    harness
        .board
        .submit_report(
            harness.caller(0),
            task.id(),
            ReportSubmission::new("Done", "Finished the work"),
        )
        .await
        .expect("report");
    let settled = settlement
        .record_review(harness.caller(1), task.id(), ReviewScore::Satisfied)
        .await
        .expect("review");
    assert_eq!(settled.achieved_score(), Some(Points::whole(6)));

    let revoted = settlement
        .record_vote(harness.caller(1), task.id(), Points::whole(5))
        .await
        .expect("replacement vote");

    assert_eq!(revoted.total_score(), Points::whole(5));
    assert_eq!(revoted.achieved_score(), Some(Points::whole(3)));
    let stored = harness.board.get_task(task.id()).await.expect("task");
    assert_eq!(stored.achieved_score(), Some(Points::whole(3)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn off_scale_review_is_checked_after_eligibility() {
    let harness = Harness::with_team(&["Alice", "Bob"]).await;
    let task_id = harness.reviewable_task(10).await;
    let settlement = harness.board.settlement();

    let own = settlement
        .record_review(harness.caller(0), task_id, 4_u8)
        .await
        .expect_err("assignee review rejected");
    assert!(matches!(own, TaskServiceError::SelfReviewForbidden(id) if id == task_id));

    let off_scale = settlement
        .record_review(harness.caller(1), task_id, 4_u8)
        .await
        .expect_err("off-scale review rejected");
    assert!(matches!(
        off_scale,
        TaskServiceError::Domain(TaskDomainError::InvalidReviewScore(4))
    ));
    let reviews = harness.store.reviews_for_task(task_id).await.expect("reviews");
    assert!(reviews.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recompute_is_idempotent() {
    let harness = Harness::with_team(&["Alice", "Bob"]).await;
    let task_id = harness.reviewable_task(10).await;
    harness
        .board
        .settlement()
        .record_review(harness.caller(1), task_id, ReviewScore::Satisfied)
        .await
        .expect("review");

    let first = harness.board.settlement().recompute(task_id).await.expect("recompute");
    let second = harness.board.settlement().recompute(task_id).await.expect("recompute");

    assert_eq!(first.achieved_score(), Some(Points::whole(6)));
    assert_eq!(first, second);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn single_member_team_never_settles() {
    let harness = Harness::with_team(&["Solo"]).await;
    let task_id = harness.reviewable_task(10).await;

    let task = harness.board.settlement().recompute(task_id).await.expect("recompute");

    assert_eq!(task.achieved_score(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reviews_are_audited() {
    let harness = Harness::with_team(&["Alice", "Bob"]).await;
    let task_id = harness.reviewable_task(10).await;

    harness
        .board
        .settlement()
        .record_review(harness.caller(1), task_id, ReviewScore::Satisfied)
        .await
        .expect("review");

    let latest = harness.audit.recent(1).await.expect("audit");
    let entry = latest.first().expect("review entry");
    assert_eq!(entry.action, AuditAction::Review);
    assert_eq!(entry.detail, "Evaluated achievement with score 3");
    assert_eq!(entry.actor, harness.member(1));
    assert_eq!(entry.related_task, Some(task_id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_failures_do_not_abort_reviews() {
    let base = Harness::with_team(&["Alice", "Bob"]).await;
    let mut failing_audit = MockAuditLog::new();
    failing_audit
        .expect_append()
        .returning(|_| Err(AuditLogError::persistence(std::io::Error::other("log offline"))));
    let board: TaskBoardService<
        InMemoryTaskStore,
        InMemoryMemberRepository,
        MockAuditLog,
        InMemoryBlobStore,
        DefaultClock,
    > = TaskBoardService::new(
        Arc::clone(&base.store),
        Arc::clone(&base.members),
        Arc::new(failing_audit),
        Arc::clone(&base.blobs),
        Arc::new(DefaultClock),
    );

    let task = board
        .create_task(base.caller(0), "Audited work", None)
        .await
        .expect("create succeeds despite audit failure");
    board
        .claim_task(base.caller(0), task.id())
        .await
        .expect("claim succeeds despite audit failure");
    board
        .submit_report(base.caller(0), task.id(), ReportSubmission::new("Done", ""))
        .await
        .expect("report succeeds despite audit failure");
    let reviewed = board
        .settlement()
        .record_review(base.caller(1), task.id(), ReviewScore::Excellent)
        .await
        .expect("review succeeds despite audit failure");

    assert_eq!(reviewed.achieved_score(), Some(Points::ZERO));
}

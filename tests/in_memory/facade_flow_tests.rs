//! Full task cycle driven through the API facade with a switching session.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use teamboard::api::{ActionOutcome, TeamboardApi};
use teamboard::audit::{adapters::memory::InMemoryAuditLog, domain::AuditAction};
use teamboard::identity::adapters::SessionIdentityProvider;
use teamboard::member::adapters::memory::InMemoryMemberRepository;
use teamboard::storage::adapters::memory::InMemoryBlobStore;
use teamboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Points, TaskId},
    services::{AttachmentUpload, ErrorKind, ReportSubmission},
};

use super::helpers::{board_with, seed_team};

type Api = TeamboardApi<
    SessionIdentityProvider,
    InMemoryTaskStore,
    InMemoryMemberRepository,
    InMemoryAuditLog,
    InMemoryBlobStore,
    DefaultClock,
>;

fn ensure_success(outcome: &ActionOutcome, step: &str) -> Result<(), eyre::Report> {
    eyre::ensure!(outcome.is_success(), "{step} failed: {outcome:?}");
    Ok(())
}

async fn only_task(api: &Api) -> Result<TaskId, eyre::Report> {
    let board = api.board().await?;
    board
        .first()
        .map(|entry| entry.task.id())
        .ok_or_else(|| eyre::eyre!("expected one task on the board"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_cycle_settles_and_reads_back() -> Result<(), eyre::Report> {
    let members = Arc::new(InMemoryMemberRepository::new());
    let team = seed_team(&members, &["Alice", "Bob", "Carol"]).await?;
    let [alice, bob, carol] = team.as_slice() else {
        return Err(eyre::eyre!("expected three team members"));
    };
    let session = Arc::new(SessionIdentityProvider::signed_in(*alice));
    let blobs = Arc::new(InMemoryBlobStore::new("https://files.test/activity-proofs"));
    let api = TeamboardApi::new(Arc::clone(&session), board_with(members, Arc::clone(&blobs)));

    ensure_success(
        &api.create_task("Migrate database".to_owned(), Some("Move to v2".to_owned()))
            .await,
        "create",
    )?;
    let task_id = only_task(&api).await?;
    ensure_success(&api.claim(task_id).await, "claim")?;
    ensure_success(
        &api.submit_report(
            task_id,
            ReportSubmission::new("Plan", "Schema drafted")
                .with_attachment(AttachmentUpload::new("schema.sql", b"create table t();".to_vec())),
        )
        .await,
        "report",
    )?;
    eyre::ensure!(blobs.blob_count()? == 1, "attachment should be uploaded");

    session.sign_in(*bob);
    ensure_success(&api.vote(task_id, "7.5".parse::<Points>()?).await, "bob vote")?;
    ensure_success(&api.review(task_id, 5).await, "bob review")?;

    session.sign_in(*carol);
    ensure_success(&api.vote(task_id, Points::whole(4)).await, "carol vote")?;
    let invalid = api.review(task_id, 4).await;
    eyre::ensure!(
        invalid.kind() == Some(ErrorKind::InvalidInput),
        "review score 4 should be rejected, got {invalid:?}"
    );
    ensure_success(&api.review(task_id, 2).await, "carol review")?;

    let board = api.board().await?;
    let entry = board
        .first()
        .ok_or_else(|| eyre::eyre!("task missing from board"))?;
    eyre::ensure!(
        entry.task.total_score() == "11.5".parse::<Points>()?,
        "total {}",
        entry.task.total_score()
    );
    // 11.5 × 7 ÷ 10 = 8.05, rounded half up.
    eyre::ensure!(
        entry.task.achieved_score() == Some(Points::whole(8)),
        "achieved {:?}",
        entry.task.achieved_score()
    );
    eyre::ensure!(entry.reports.len() == 1, "one report expected");

    let feed = api.recent_activity().await?;
    let actions: Vec<AuditAction> = feed.iter().map(|item| item.entry.action).collect();
    eyre::ensure!(
        actions
            == [
                AuditAction::Review,
                AuditAction::Review,
                AuditAction::Report,
                AuditAction::Claim,
                AuditAction::Create,
            ],
        "unexpected feed {actions:?}"
    );
    eyre::ensure!(
        feed.iter()
            .all(|item| item.actor_name.as_deref().is_some_and(|name| !name.is_empty())),
        "every feed entry should name its actor"
    );

    session.sign_out();
    let anonymous_delete = api.delete_task(task_id).await;
    ensure_success(&anonymous_delete, "anonymous delete")?;
    eyre::ensure!(api.board().await?.is_empty(), "task should be gone");
    Ok(())
}

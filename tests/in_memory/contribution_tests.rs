//! Board view and contribution summary across several assignees.

use std::sync::Arc;

use rstest::rstest;
use teamboard::member::adapters::memory::InMemoryMemberRepository;
use teamboard::storage::adapters::memory::InMemoryBlobStore;
use teamboard::task::{
    domain::{Points, ReviewScore, Rgb},
    services::{ReportSubmission, TaskUpdate, UNASSIGNED_LABEL},
};

use super::helpers::{board_with, caller, seed_team};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settled_work_feeds_the_contribution_summary() -> Result<(), eyre::Report> {
    let members = Arc::new(InMemoryMemberRepository::new());
    let team = seed_team(&members, &["Carol", "Alice", "Bob"]).await?;
    let board = board_with(Arc::clone(&members), Arc::new(InMemoryBlobStore::default()));
    let carol = caller(&team, 0)?;
    let alice = caller(&team, 1)?;
    let bob = caller(&team, 2)?;

    let settled = board.create_task(alice, "Ship release", None).await?;
    board.claim_task(alice, settled.id()).await?;
    board
        .submit_report(alice, settled.id(), ReportSubmission::new("Done", "Tagged v1"))
        .await?;
    board
        .settlement()
        .record_vote(bob, settled.id(), Points::whole(10))
        .await?;
    board
        .settlement()
        .record_vote(carol, settled.id(), Points::whole(10))
        .await?;
    board
        .settlement()
        .record_review(bob, settled.id(), ReviewScore::try_from(5)?)
        .await?;
    board
        .settlement()
        .record_review(carol, settled.id(), ReviewScore::try_from(3)?)
        .await?;

    let pending = board.create_task(bob, "Fix login", None).await?;
    board.claim_task(bob, pending.id()).await?;
    board
        .update_task(bob, pending.id(), TaskUpdate::new().with_total_score(Points::whole(5)))
        .await?;
    board.create_task(carol, "Nobody's job", None).await?;

    let summary = board.contributions().await?;
    let names: Vec<&str> = summary.members.iter().map(|c| c.name.as_str()).collect();
    eyre::ensure!(names == ["Alice", "Bob"], "unexpected assignees {names:?}");
    let alice_row = summary
        .members
        .first()
        .ok_or_else(|| eyre::eyre!("missing Alice"))?;
    eyre::ensure!(alice_row.total == Points::whole(20), "Alice total {}", alice_row.total);
    eyre::ensure!(
        alice_row.achieved == Points::whole(16),
        "Alice achieved {}",
        alice_row.achieved
    );
    eyre::ensure!(alice_row.percentage == 80, "Alice percentage {}", alice_row.percentage);
    let bob_row = summary
        .members
        .get(1)
        .ok_or_else(|| eyre::eyre!("missing Bob"))?;
    eyre::ensure!(bob_row.achieved == Points::ZERO, "Bob achieved {}", bob_row.achieved);
    eyre::ensure!(bob_row.percentage == 0, "Bob percentage {}", bob_row.percentage);
    eyre::ensure!(
        summary.project_total == Points::whole(25),
        "project total {}",
        summary.project_total
    );

    let entries = board.board(bob).await?;
    let unassigned = entries
        .iter()
        .find(|entry| entry.task.assignee().is_none())
        .ok_or_else(|| eyre::eyre!("unassigned task missing"))?;
    eyre::ensure!(unassigned.assignee_name == UNASSIGNED_LABEL, "unexpected label");
    let released = entries
        .iter()
        .find(|entry| entry.task.id() == settled.id())
        .ok_or_else(|| eyre::eyre!("settled task missing"))?;
    eyre::ensure!(released.assignee_name == "Alice", "unexpected assignee name");
    eyre::ensure!(released.review_count == 2, "review count {}", released.review_count);
    eyre::ensure!(
        released.my_review == Some(ReviewScore::try_from(5)?),
        "Bob's review should be shown"
    );
    eyre::ensure!(
        released.achievement_color() == Some(Rgb::new(104, 208, 24)),
        "unexpected colour {:?}",
        released.achievement_color()
    );
    Ok(())
}

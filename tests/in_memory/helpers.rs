//! Shared test helpers for adapter integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use teamboard::audit::adapters::memory::InMemoryAuditLog;
use teamboard::identity::Caller;
use teamboard::member::{
    adapters::memory::InMemoryMemberRepository,
    domain::{Member, MemberId, MemberName},
    ports::MemberRepository,
};
use teamboard::storage::ports::BlobStore;
use teamboard::task::{adapters::memory::InMemoryTaskStore, services::TaskBoardService};

/// Board service over in-memory repositories and the given blob store.
pub type Board<B> =
    TaskBoardService<InMemoryTaskStore, InMemoryMemberRepository, InMemoryAuditLog, B, DefaultClock>;

/// Stores one member per name and returns their identifiers in order.
///
/// # Errors
///
/// Returns an error if a name is invalid or the repository rejects a member.
pub async fn seed_team(
    members: &InMemoryMemberRepository,
    names: &[&str],
) -> Result<Vec<MemberId>, eyre::Report> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let member = Member::new(MemberId::new(), MemberName::new(*name)?);
        members.store(&member).await?;
        ids.push(member.id());
    }
    Ok(ids)
}

/// Builds a board service over fresh in-memory repositories.
pub fn board_with<B: BlobStore>(members: Arc<InMemoryMemberRepository>, blobs: Arc<B>) -> Board<B> {
    TaskBoardService::new(
        Arc::new(InMemoryTaskStore::new()),
        members,
        Arc::new(InMemoryAuditLog::new()),
        blobs,
        Arc::new(DefaultClock),
    )
}

/// Returns the caller for the team member at `index`.
///
/// # Errors
///
/// Returns an error if the team has no member at `index`.
pub fn caller(team: &[MemberId], index: usize) -> Result<Caller, eyre::Report> {
    team.get(index)
        .copied()
        .map(Caller::Member)
        .ok_or_else(|| eyre::eyre!("no team member at index {index}"))
}

//! Shared world state for score settlement BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use teamboard::audit::adapters::memory::InMemoryAuditLog;
use teamboard::identity::Caller;
use teamboard::member::{adapters::memory::InMemoryMemberRepository, domain::MemberId};
use teamboard::storage::adapters::memory::InMemoryBlobStore;
use teamboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Points, TaskId},
    services::{TaskBoardService, TaskServiceError},
};

/// Board service type used by the BDD world.
pub type TestBoard = TaskBoardService<
    InMemoryTaskStore,
    InMemoryMemberRepository,
    InMemoryAuditLog,
    InMemoryBlobStore,
    DefaultClock,
>;

/// Scenario world for settlement behaviour tests.
pub struct SettlementWorld {
    pub board: TestBoard,
    pub members: Arc<InMemoryMemberRepository>,
    pub team: HashMap<String, MemberId>,
    pub task: Option<TaskId>,
    pub last_error: Option<TaskServiceError>,
}

impl SettlementWorld {
    /// Creates a world with an empty team.
    #[must_use]
    pub fn new() -> Self {
        let members = Arc::new(InMemoryMemberRepository::new());
        let board = TaskBoardService::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::clone(&members),
            Arc::new(InMemoryAuditLog::new()),
            Arc::new(InMemoryBlobStore::default()),
            Arc::new(DefaultClock),
        );
        Self {
            board,
            members,
            team: HashMap::new(),
            task: None,
            last_error: None,
        }
    }

    /// Resolves a team member's name to a caller.
    pub fn caller(&self, name: &str) -> Result<Caller, eyre::Report> {
        self.team
            .get(name)
            .copied()
            .map(Caller::Member)
            .ok_or_else(|| eyre::eyre!("unknown team member {name}"))
    }

    /// Returns the scenario's task.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task
            .ok_or_else(|| eyre::eyre!("no task in scenario world"))
    }
}

impl Default for SettlementWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SettlementWorld {
    SettlementWorld::default()
}

/// Parses a point value written in a step.
pub fn parse_points(raw: &str) -> Result<Points, eyre::Report> {
    raw.parse()
        .map_err(|err| eyre::eyre!("invalid point value in step: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Shared harness for task service tests.

use std::sync::Arc;

use crate::audit::adapters::memory::InMemoryAuditLog;
use crate::identity::Caller;
use crate::member::{
    adapters::memory::InMemoryMemberRepository,
    domain::{Member, MemberId, MemberName},
    ports::MemberRepository,
};
use crate::storage::adapters::memory::InMemoryBlobStore;
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Points, Task, TaskId},
    services::{ReportSubmission, TaskBoardService, TaskUpdate},
};
use mockable::DefaultClock;

pub(super) type TestBoard = TaskBoardService<
    InMemoryTaskStore,
    InMemoryMemberRepository,
    InMemoryAuditLog,
    InMemoryBlobStore,
    DefaultClock,
>;

pub(super) struct Harness {
    pub store: Arc<InMemoryTaskStore>,
    pub members: Arc<InMemoryMemberRepository>,
    pub audit: Arc<InMemoryAuditLog>,
    pub blobs: Arc<InMemoryBlobStore>,
    pub board: TestBoard,
    pub team: Vec<MemberId>,
}

impl Harness {
    /// Builds a board whose team consists of `names`, in order.
    pub async fn with_team(names: &[&str]) -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let members = Arc::new(InMemoryMemberRepository::new());
        let audit = Arc::new(InMemoryAuditLog::new());
        let blobs = Arc::new(InMemoryBlobStore::new("https://files.test/activity-proofs"));

        let mut team = Vec::with_capacity(names.len());
        for name in names {
            let member = Member::new(
                MemberId::new(),
                MemberName::new(*name).expect("valid member name"),
            );
            members.store(&member).await.expect("member stored");
            team.push(member.id());
        }

        let board = TaskBoardService::new(
            Arc::clone(&store),
            Arc::clone(&members),
            Arc::clone(&audit),
            Arc::clone(&blobs),
            Arc::new(DefaultClock),
        );
        Self {
            store,
            members,
            audit,
            blobs,
            board,
            team,
        }
    }

    pub fn member(&self, index: usize) -> MemberId {
        *self.team.get(index).expect("team member exists")
    }

    pub fn caller(&self, index: usize) -> Caller {
        Caller::Member(self.member(index))
    }

    /// Creates a task and has team member `assignee` claim it.
    pub async fn claimed_task(&self, title: &str, assignee: usize) -> Task {
        let task = self
            .board
            .create_task(self.caller(assignee), title, None)
            .await
            .expect("task created");
        self.board
            .claim_task(self.caller(assignee), task.id())
            .await
            .expect("task claimed")
    }

    /// Creates a claimed task with one report and a manual total.
    pub async fn reviewable_task(&self, total: u32) -> TaskId {
        let task = self.claimed_task("Reviewable work", 0).await;
        self.board
            .submit_report(
                self.caller(0),
                task.id(),
                ReportSubmission::new("Done", "Finished the work"),
            )
            .await
            .expect("report submitted");
        self.board
            .update_task(
                self.caller(0),
                task.id(),
                TaskUpdate::new().with_total_score(Points::whole(total)),
            )
            .await
            .expect("total set");
        task.id()
    }
}

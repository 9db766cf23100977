//! In-memory task store for tests and single-process use.
//!
//! One lock guards tasks and their dependent records, so vote totals, report
//! sequencing, and cascading deletes are atomic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::member::domain::MemberId;
use crate::task::{
    domain::{
        AchievementReview, ActivityReport, NewActivityReport, Points, ReportSequence, Task,
        TaskId, Vote,
    },
    ports::{
        ActivityReportRepository, ReviewRepository, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, VoteRepository,
    },
};

/// Thread-safe in-memory implementation of every task-context port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_insertion: u64,
    votes: HashMap<(TaskId, MemberId), Vote>,
    reviews: HashMap<(TaskId, MemberId), AchievementReview>,
    reports: HashMap<TaskId, Vec<ActivityReport>>,
}

#[derive(Debug)]
struct StoredTask {
    task: Task,
    insertion: u64,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn ensure_task_exists(state: &InMemoryTaskState, task_id: TaskId) -> TaskRepositoryResult<()> {
    if state.tasks.contains_key(&task_id) {
        Ok(())
    } else {
        Err(TaskRepositoryError::NotFound(task_id))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let insertion = state.next_insertion;
        state.next_insertion = insertion.saturating_add(1);
        state.tasks.insert(
            task.id(),
            StoredTask {
                task: task.clone(),
                insertion,
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.task = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.votes.retain(|(task_id, _), _| *task_id != id);
        state.reviews.retain(|(task_id, _), _| *task_id != id);
        state.reports.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn list_newest_first(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut stored: Vec<&StoredTask> = state.tasks.values().collect();
        stored.sort_by(|left, right| {
            right
                .task
                .created_at()
                .cmp(&left.task.created_at())
                .then_with(|| right.insertion.cmp(&left.insertion))
        });
        Ok(stored.into_iter().map(|entry| entry.task.clone()).collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryTaskStore {
    async fn upsert_vote(&self, vote: &Vote) -> TaskRepositoryResult<Points> {
        let mut state = self.write()?;
        ensure_task_exists(&state, vote.task_id())?;
        state.votes.insert((vote.task_id(), vote.voter()), *vote);
        Ok(state
            .votes
            .values()
            .filter(|stored| stored.task_id() == vote.task_id())
            .map(|stored| stored.score().points())
            .sum())
    }

    async fn votes_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Vote>> {
        let state = self.read()?;
        Ok(state
            .votes
            .values()
            .filter(|vote| vote.task_id() == task_id)
            .copied()
            .collect())
    }

    async fn votes_by_voter(&self, voter: MemberId) -> TaskRepositoryResult<Vec<Vote>> {
        let state = self.read()?;
        Ok(state
            .votes
            .values()
            .filter(|vote| vote.voter() == voter)
            .copied()
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryTaskStore {
    async fn upsert_review(&self, review: &AchievementReview) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        ensure_task_exists(&state, review.task_id())?;
        state
            .reviews
            .insert((review.task_id(), review.reviewer()), *review);
        Ok(())
    }

    async fn reviews_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<AchievementReview>> {
        let state = self.read()?;
        Ok(state
            .reviews
            .values()
            .filter(|review| review.task_id() == task_id)
            .copied()
            .collect())
    }

    async fn reviews_by_reviewer(
        &self,
        reviewer: MemberId,
    ) -> TaskRepositoryResult<Vec<AchievementReview>> {
        let state = self.read()?;
        Ok(state
            .reviews
            .values()
            .filter(|review| review.reviewer() == reviewer)
            .copied()
            .collect())
    }

    async fn review_counts(&self) -> TaskRepositoryResult<HashMap<TaskId, u64>> {
        let state = self.read()?;
        let mut counts: HashMap<TaskId, u64> = HashMap::new();
        for (task_id, _) in state.reviews.keys() {
            let count = counts.entry(*task_id).or_default();
            *count = count.saturating_add(1);
        }
        Ok(counts)
    }
}

#[async_trait]
impl ActivityReportRepository for InMemoryTaskStore {
    async fn append_report(
        &self,
        report: NewActivityReport,
    ) -> TaskRepositoryResult<ActivityReport> {
        let mut state = self.write()?;
        ensure_task_exists(&state, report.task_id())?;
        let reports = state.reports.entry(report.task_id()).or_default();
        let sequence = reports
            .last()
            .map_or(ReportSequence::FIRST, |latest| latest.sequence().next());
        let stored = report.into_report(sequence);
        reports.push(stored.clone());
        Ok(stored)
    }

    async fn reports_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<ActivityReport>> {
        let state = self.read()?;
        Ok(state.reports.get(&task_id).cloned().unwrap_or_default())
    }

    async fn report_count(&self, task_id: TaskId) -> TaskRepositoryResult<u64> {
        let state = self.read()?;
        let count = state.reports.get(&task_id).map_or(0, Vec::len);
        u64::try_from(count).map_err(TaskRepositoryError::persistence)
    }
}

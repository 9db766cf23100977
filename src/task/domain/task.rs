//! Task aggregate root.

use super::{Points, TaskDomainError, TaskId};
use crate::member::domain::MemberId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a task title, matching the `VARCHAR(200)` column.
const MAX_TITLE_LENGTH: usize = 200;

/// Trimmed, non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when the value is empty
    /// after trimming, or [`TaskDomainError::TaskTitleTooLong`] when it
    /// exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle);
        }
        if normalized.chars().count() > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TaskTitleTooLong);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a claim attempt that did not conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The task was unassigned and now belongs to the claimant.
    Claimed,
    /// The claimant already held the task; nothing changed.
    AlreadyHeld,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    assignee: Option<MemberId>,
    total_score: Points,
    achieved_score: Option<Points>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted assignee, if any.
    pub assignee: Option<MemberId>,
    /// Persisted vote total.
    pub total_score: Points,
    /// Persisted settled score, if any.
    pub achieved_score: Option<Points>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new unassigned task with no points.
    #[must_use]
    pub fn new(title: TaskTitle, description: Option<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title,
            description: normalize_description(description),
            assignee: None,
            total_score: Points::ZERO,
            achieved_score: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            total_score: data.total_score,
            achieved_score: data.achieved_score,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assigned member, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<MemberId> {
        self.assignee
    }

    /// Returns `true` when `member` holds the task.
    #[must_use]
    pub fn is_assigned_to(&self, member: MemberId) -> bool {
        self.assignee == Some(member)
    }

    /// Returns the sum of the task's votes.
    #[must_use]
    pub const fn total_score(&self) -> Points {
        self.total_score
    }

    /// Returns the settled score, once peer review has completed.
    #[must_use]
    pub const fn achieved_score(&self) -> Option<Points> {
        self.achieved_score
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns the task to `member`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyClaimed`] when another member
    /// already holds the task.
    pub fn claim(
        &mut self,
        member: MemberId,
        clock: &impl Clock,
    ) -> Result<ClaimOutcome, TaskDomainError> {
        match self.assignee {
            Some(current) if current == member => Ok(ClaimOutcome::AlreadyHeld),
            Some(current) => Err(TaskDomainError::AlreadyClaimed {
                task_id: self.id,
                assignee: current,
            }),
            None => {
                self.assignee = Some(member);
                self.touch(clock);
                Ok(ClaimOutcome::Claimed)
            }
        }
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the description. Blank descriptions are stored as `None`.
    pub fn describe(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = normalize_description(description);
        self.touch(clock);
    }

    /// Sets or clears the assignee as part of a manual edit.
    pub fn reassign(&mut self, assignee: Option<MemberId>, clock: &impl Clock) {
        self.assignee = assignee;
        self.touch(clock);
    }

    /// Replaces the vote total.
    pub fn set_total_score(&mut self, total: Points, clock: &impl Clock) {
        self.total_score = total;
        self.touch(clock);
    }

    /// Records the settled score.
    pub fn settle(&mut self, achieved: Points, clock: &impl Clock) {
        self.achieved_score = Some(achieved);
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

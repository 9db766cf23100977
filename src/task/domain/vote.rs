//! Votes and peer reviews keyed by (task, member).

use super::{ReviewScore, TaskId, VoteScore};
use crate::member::domain::MemberId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A member's point contribution to a task.
///
/// At most one vote exists per (task, voter); casting again replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    task_id: TaskId,
    voter: MemberId,
    score: VoteScore,
    cast_at: DateTime<Utc>,
}

impl Vote {
    /// Creates a vote stamped with the current clock time.
    #[must_use]
    pub fn new(task_id: TaskId, voter: MemberId, score: VoteScore, clock: &impl Clock) -> Self {
        Self::from_persisted(task_id, voter, score, clock.utc())
    }

    /// Reconstructs a vote from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        task_id: TaskId,
        voter: MemberId,
        score: VoteScore,
        cast_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            voter,
            score,
            cast_at,
        }
    }

    /// Returns the voted task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the voting member.
    #[must_use]
    pub const fn voter(&self) -> MemberId {
        self.voter
    }

    /// Returns the vote score.
    #[must_use]
    pub const fn score(&self) -> VoteScore {
        self.score
    }

    /// Returns when the vote was last cast.
    #[must_use]
    pub const fn cast_at(&self) -> DateTime<Utc> {
        self.cast_at
    }
}

/// A peer's approval score for a task's completed work.
///
/// At most one review exists per (task, reviewer); reviewing again replaces
/// it. The reviewer is never the task's assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementReview {
    task_id: TaskId,
    reviewer: MemberId,
    score: ReviewScore,
    reviewed_at: DateTime<Utc>,
}

impl AchievementReview {
    /// Creates a review stamped with the current clock time.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        reviewer: MemberId,
        score: ReviewScore,
        clock: &impl Clock,
    ) -> Self {
        Self::from_persisted(task_id, reviewer, score, clock.utc())
    }

    /// Reconstructs a review from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        task_id: TaskId,
        reviewer: MemberId,
        score: ReviewScore,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            reviewer,
            score,
            reviewed_at,
        }
    }

    /// Returns the reviewed task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the reviewing member.
    #[must_use]
    pub const fn reviewer(&self) -> MemberId {
        self.reviewer
    }

    /// Returns the review score.
    #[must_use]
    pub const fn score(&self) -> ReviewScore {
        self.score
    }

    /// Returns when the review was last submitted.
    #[must_use]
    pub const fn reviewed_at(&self) -> DateTime<Utc> {
        self.reviewed_at
    }
}

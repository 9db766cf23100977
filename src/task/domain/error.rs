//! Error types for task domain validation and parsing.

use super::{Points, TaskId};
use crate::member::domain::MemberId;
use thiserror::Error;

/// Errors returned while constructing or mutating task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the storage limit.
    #[error("task title exceeds 200 character limit")]
    TaskTitleTooLong,

    /// The task is already held by another member.
    #[error("task {task_id} is already claimed by {assignee}")]
    AlreadyClaimed {
        /// The contested task.
        task_id: TaskId,
        /// The member currently holding the task.
        assignee: MemberId,
    },

    /// A vote score lies outside `0..=10`.
    #[error("vote score {0} is outside the range 0 to 10")]
    InvalidVoteScore(Points),

    /// A review score is not one of 0, 2, 3, or 5.
    #[error("review score {0} is not one of 0, 2, 3, 5")]
    InvalidReviewScore(u8),

    /// The activity report title is empty after trimming.
    #[error("activity report title must not be empty")]
    EmptyReportTitle,

    /// An attachment was submitted without a usable file name.
    #[error("attachment file name '{0}' is not usable")]
    InvalidAttachmentName(String),

    /// A report sequence number was zero.
    #[error("report sequence numbers start at 1")]
    InvalidReportSequence,
}

/// Error returned while parsing a point value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid point value '{0}', expected a non-negative multiple of 0.5")]
pub struct ParsePointsError(pub String);

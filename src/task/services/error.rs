//! Service-level errors and their caller-facing classification.

use crate::audit::ports::AuditLogError;
use crate::member::{domain::MemberId, ports::MemberRepositoryError};
use crate::storage::ports::BlobStoreError;
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No authenticated caller.
    Unauthenticated,
    /// The target entity does not exist.
    NotFound,
    /// The caller may not perform this action on the target.
    Forbidden,
    /// The target is not in a state that allows the action yet.
    Precondition,
    /// The request carried an invalid value.
    InvalidInput,
    /// A collaborator (database, blob store) failed.
    UpstreamFailure,
}

impl ErrorKind {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Precondition => "precondition",
            Self::InvalidInput => "invalid_input",
            Self::UpstreamFailure => "upstream_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by task board and settlement services.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// The operation requires a signed-in member.
    #[error("sign in required")]
    Unauthenticated,

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The member does not exist.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),

    /// The caller tried to review their own task.
    #[error("cannot review your own task {0}")]
    SelfReviewForbidden(TaskId),

    /// The task has no activity reports to review.
    #[error("task {0} has no activity reports yet")]
    NoActivityYet(TaskId),

    /// Only the assignee may report on a task.
    #[error("only the assignee may report on task {0}")]
    NotAssignee(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Member lookup failed.
    #[error(transparent)]
    Members(#[from] MemberRepositoryError),

    /// The audit trail could not be read.
    #[error(transparent)]
    Audit(#[from] AuditLogError),

    /// The attachment could not be stored.
    #[error(transparent)]
    Storage(#[from] BlobStoreError),
}

impl TaskServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::TaskNotFound(_)
            | Self::MemberNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::SelfReviewForbidden(_)
            | Self::NotAssignee(_)
            | Self::Domain(TaskDomainError::AlreadyClaimed { .. }) => ErrorKind::Forbidden,
            Self::NoActivityYet(_) => ErrorKind::Precondition,
            Self::Domain(_) => ErrorKind::InvalidInput,
            Self::Repository(_) | Self::Members(_) | Self::Audit(_) | Self::Storage(_) => {
                ErrorKind::UpstreamFailure
            }
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

//! Audit entry and action kinds.

use crate::member::domain::MemberId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Kind of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A task was created.
    Create,
    /// A task was edited.
    Update,
    /// A task was deleted.
    Delete,
    /// A member claimed a task.
    Claim,
    /// An activity report was submitted.
    Report,
    /// A peer review was submitted.
    Review,
}

impl AuditAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Claim => "CLAIM",
            Self::Report => "REPORT",
            Self::Review => "REVIEW",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing audit actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit action: {0}")]
pub struct ParseAuditActionError(pub String);

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "CLAIM" => Ok(Self::Claim),
            "REPORT" => Ok(Self::Report),
            "REVIEW" => Ok(Self::Review),
            _ => Err(ParseAuditActionError(value.to_owned())),
        }
    }
}

/// Unique identifier for an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEntryId(Uuid);

impl AuditEntryId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AuditEntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// One immutable record in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Entry identifier.
    pub id: AuditEntryId,
    /// Member who performed the action.
    pub actor: MemberId,
    /// Kind of action.
    pub action: AuditAction,
    /// Human-readable description.
    pub detail: String,
    /// Task the action concerned, if any. The task may since have been
    /// deleted.
    pub related_task: Option<TaskId>,
    /// When the action happened.
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates an entry stamped with the current clock time.
    #[must_use]
    pub fn new(
        actor: MemberId,
        action: AuditAction,
        detail: impl Into<String>,
        related_task: Option<TaskId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            actor,
            action,
            detail: detail.into(),
            related_task,
            recorded_at: clock.utc(),
        }
    }
}

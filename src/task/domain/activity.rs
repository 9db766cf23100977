//! Activity reports: the assignee's progress updates on a task.
//!
//! A task needs at least one report before peer review opens.

use super::{ReportId, TaskDomainError, TaskId};
use crate::member::domain::MemberId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Per-task position of a report, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportSequence(u32);

impl ReportSequence {
    /// Sequence number of a task's first report.
    pub const FIRST: Self = Self(1);

    /// Creates a validated sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidReportSequence`] for zero.
    pub const fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidReportSequence);
        }
        Ok(Self(value))
    }

    /// Returns the sequence number following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReportSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored proof file linked from a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Public retrieval URL.
    pub url: String,
    /// Lowercase hex SHA-256 digest of the stored bytes.
    pub sha256: String,
}

impl Attachment {
    /// Describes stored `bytes` reachable at `url`.
    #[must_use]
    pub fn for_contents(url: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            url: url.into(),
            sha256: format!("{:x}", Sha256::digest(bytes)),
        }
    }
}

/// A report that has not yet been given a sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivityReport {
    task_id: TaskId,
    author: MemberId,
    title: String,
    content: String,
    attachment: Option<Attachment>,
    created_at: DateTime<Utc>,
}

impl NewActivityReport {
    /// Creates a report draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReportTitle`] when the title is blank.
    pub fn new(
        task_id: TaskId,
        author: MemberId,
        title: impl Into<String>,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyReportTitle);
        }
        Ok(Self {
            task_id,
            author,
            title: trimmed.to_owned(),
            content: content.into(),
            attachment: None,
            created_at: clock.utc(),
        })
    }

    /// Links a stored attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Returns the reported task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Assigns the report its sequence number.
    #[must_use]
    pub fn into_report(self, sequence: ReportSequence) -> ActivityReport {
        ActivityReport {
            id: ReportId::new(),
            task_id: self.task_id,
            author: self.author,
            title: self.title,
            content: self.content,
            attachment: self.attachment,
            sequence,
            created_at: self.created_at,
        }
    }
}

/// A progress update submitted by a task's assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    id: ReportId,
    task_id: TaskId,
    author: MemberId,
    title: String,
    content: String,
    attachment: Option<Attachment>,
    sequence: ReportSequence,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReportData {
    /// Persisted report identifier.
    pub id: ReportId,
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted author.
    pub author: MemberId,
    /// Persisted title.
    pub title: String,
    /// Persisted body text.
    pub content: String,
    /// Persisted attachment, if any.
    pub attachment: Option<Attachment>,
    /// Persisted sequence number.
    pub sequence: ReportSequence,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ActivityReport {
    /// Reconstructs a report from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReportData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author: data.author,
            title: data.title,
            content: data.content,
            attachment: data.attachment,
            sequence: data.sequence,
            created_at: data.created_at,
        }
    }

    /// Returns the report identifier.
    #[must_use]
    pub const fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the reported task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting member.
    #[must_use]
    pub const fn author(&self) -> MemberId {
        self.author
    }

    /// Returns the report title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the report body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the attachment, if any.
    #[must_use]
    pub const fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Returns the per-task sequence number.
    #[must_use]
    pub const fn sequence(&self) -> ReportSequence {
        self.sequence
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

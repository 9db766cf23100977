//! Member record and validated display name.

use super::{MemberDomainError, MemberId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a member name, matching the `VARCHAR(100)` column.
const MAX_NAME_LENGTH: usize = 100;

/// Trimmed, non-empty display name of a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberName(String);

impl MemberName {
    /// Creates a validated member name.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyMemberName`] when the value is empty
    /// after trimming, or [`MemberDomainError::MemberNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, MemberDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(MemberDomainError::EmptyMemberName);
        }
        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(MemberDomainError::MemberNameTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A team participant: potential voter, assignee, and reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: MemberName,
    email: Option<String>,
}

impl Member {
    /// Creates a member record.
    #[must_use]
    pub const fn new(id: MemberId, name: MemberName) -> Self {
        Self {
            id,
            name,
            email: None,
        }
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &MemberName {
        &self.name
    }

    /// Returns the contact email, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

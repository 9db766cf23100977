//! The identity an operation runs under.

use crate::member::domain::MemberId;
use serde::{Deserialize, Serialize};

/// Who is invoking an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Caller {
    /// No authenticated identity.
    #[default]
    Anonymous,
    /// An authenticated member.
    Member(MemberId),
}

impl Caller {
    /// Returns the member identifier when authenticated.
    #[must_use]
    pub const fn member_id(self) -> Option<MemberId> {
        match self {
            Self::Anonymous => None,
            Self::Member(id) => Some(id),
        }
    }

    /// Returns `true` when the caller is an authenticated member.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Member(_))
    }
}

impl From<Option<MemberId>> for Caller {
    fn from(value: Option<MemberId>) -> Self {
        value.map_or(Self::Anonymous, Self::Member)
    }
}

impl From<MemberId> for Caller {
    fn from(value: MemberId) -> Self {
        Self::Member(value)
    }
}

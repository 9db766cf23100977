//! Error types for member domain validation.

use thiserror::Error;

/// Errors returned while constructing member values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MemberDomainError {
    /// The member name is empty after trimming.
    #[error("member name must not be empty")]
    EmptyMemberName,

    /// The member name exceeds the storage limit.
    #[error("member name exceeds 100 character limit: {0}")]
    MemberNameTooLong(String),
}

//! Relative blob paths.

use std::fmt;
use thiserror::Error;

/// Errors returned while validating a blob path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlobPathError {
    /// The path is empty.
    #[error("blob path must not be empty")]
    Empty,

    /// The path starts with a separator.
    #[error("blob path '{0}' must be relative")]
    Absolute(String),

    /// A segment is empty, `.` or `..`, or contains a backslash.
    #[error("blob path '{0}' contains an invalid segment")]
    InvalidSegment(String),
}

/// A `/`-separated path relative to the bucket root.
///
/// Paths never escape the bucket: `.`/`..` segments, empty segments, and
/// backslashes are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobPath(String);

impl BlobPath {
    /// Validates and wraps a relative path.
    ///
    /// # Errors
    ///
    /// Returns [`BlobPathError`] when the path is empty, absolute, or has an
    /// invalid segment.
    pub fn new(value: impl Into<String>) -> Result<Self, BlobPathError> {
        let path = value.into();
        if path.is_empty() {
            return Err(BlobPathError::Empty);
        }
        if path.starts_with('/') {
            return Err(BlobPathError::Absolute(path));
        }
        if !path.split('/').all(is_valid_segment) {
            return Err(BlobPathError::InvalidSegment(path));
        }
        Ok(Self(path))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the directory part, if the path has one.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// Returns the final segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }
}

/// Returns `true` when `segment` is a usable single path component.
#[must_use]
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\')
}

impl fmt::Display for BlobPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BlobPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Uniform result shape for mutating operations.

use crate::task::services::{ErrorKind, TaskServiceError, TaskServiceResult};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Outcome of a mutating operation.
///
/// Serialises to `{"success": true}` or
/// `{"error": "<message>", "kind": "<kind>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The operation completed.
    Success,
    /// The operation was rejected or failed.
    Failure {
        /// Human-readable reason.
        error: String,
        /// Classification of the failure.
        kind: ErrorKind,
    },
}

impl ActionOutcome {
    /// Builds an outcome from a service result.
    ///
    /// Upstream failures are logged at `warn` level before being returned.
    #[must_use]
    pub fn from_result<T>(result: TaskServiceResult<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(err) => Self::from_error(&err),
        }
    }

    /// Builds a failure outcome from a service error.
    #[must_use]
    pub fn from_error(err: &TaskServiceError) -> Self {
        let kind = err.kind();
        if kind == ErrorKind::UpstreamFailure {
            tracing::warn!(error = %err, "operation failed upstream");
        }
        Self::Failure {
            error: err.to_string(),
            kind,
        }
    }

    /// Returns `true` for [`ActionOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the failure kind, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl Serialize for ActionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("success", &true)?;
                map.end()
            }
            Self::Failure { error, kind } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("kind", kind)?;
                map.end()
            }
        }
    }
}

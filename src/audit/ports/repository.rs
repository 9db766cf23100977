//! Repository port for the audit trail.

use crate::audit::domain::AuditEntry;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit repository operations.
pub type AuditLogResult<T> = Result<T, AuditLogError>;

/// Append-only audit persistence contract.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Appends an entry.
    async fn append(&self, entry: &AuditEntry) -> AuditLogResult<()>;

    /// Returns up to `limit` entries, newest first.
    async fn recent(&self, limit: usize) -> AuditLogResult<Vec<AuditEntry>>;
}

/// Errors returned by audit repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditLogError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }
}

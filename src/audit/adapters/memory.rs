//! In-memory audit trail.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::audit::{
    domain::AuditEntry,
    ports::{AuditLogError, AuditLogRepository, AuditLogResult},
};

/// Thread-safe in-memory audit repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    /// Creates an empty audit trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLog {
    async fn append(&self, entry: &AuditEntry) -> AuditLogResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| AuditLogError::persistence(std::io::Error::other(err.to_string())))?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> AuditLogResult<Vec<AuditEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| AuditLogError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

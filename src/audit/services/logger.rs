//! Best-effort audit writer.

use crate::audit::{
    domain::{AuditAction, AuditEntry},
    ports::{AuditLogRepository, AuditLogResult},
};
use crate::member::domain::MemberId;
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;

/// Records audit entries without letting failures escape.
#[derive(Clone)]
pub struct AuditLogger<A, C>
where
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> AuditLogger<A, C>
where
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new audit logger.
    #[must_use]
    pub const fn new(repository: Arc<A>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Appends an entry to the audit trail.
    ///
    /// A failed write is logged at `warn` level and otherwise ignored.
    pub async fn record(
        &self,
        actor: MemberId,
        action: AuditAction,
        detail: impl Into<String> + Send,
        related_task: Option<TaskId>,
    ) {
        let entry = AuditEntry::new(actor, action, detail, related_task, &*self.clock);
        if let Err(err) = self.repository.append(&entry).await {
            tracing::warn!(
                error = %err,
                action = %action,
                actor = %actor,
                "failed to record audit entry"
            );
        }
    }

    /// Returns up to `limit` entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::audit::ports::AuditLogError`] when the trail cannot be
    /// read.
    pub async fn recent(&self, limit: usize) -> AuditLogResult<Vec<AuditEntry>> {
        self.repository.recent(limit).await
    }
}

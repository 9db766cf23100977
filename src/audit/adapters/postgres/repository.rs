//! `PostgreSQL` repository implementation for the audit trail.

use super::{models::AuditRow, schema::system_logs};
use crate::audit::{
    domain::{AuditAction, AuditEntry, AuditEntryId},
    ports::{AuditLogError, AuditLogRepository, AuditLogResult},
};
use crate::member::domain::MemberId;
use crate::postgres::TeamboardPgPool;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed audit repository.
#[derive(Debug, Clone)]
pub struct PostgresAuditLog {
    pool: TeamboardPgPool,
}

impl PostgresAuditLog {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TeamboardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AuditLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AuditLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AuditLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AuditLogError::persistence)?
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLog {
    async fn append(&self, entry: &AuditEntry) -> AuditLogResult<()> {
        let row = AuditRow {
            id: entry.id.into_inner(),
            user_id: entry.actor.into_inner(),
            action_type: entry.action.as_str().to_owned(),
            details: entry.detail.clone(),
            related_task_id: entry.related_task.map(TaskId::into_inner),
            created_at: entry.recorded_at,
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(system_logs::table)
                .values(&row)
                .execute(connection)
                .map_err(AuditLogError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn recent(&self, limit: usize) -> AuditLogResult<Vec<AuditEntry>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            system_logs::table
                .order(system_logs::created_at.desc())
                .limit(row_limit)
                .select(AuditRow::as_select())
                .load::<AuditRow>(connection)
                .map_err(AuditLogError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }
}

fn row_to_entry(row: AuditRow) -> AuditLogResult<AuditEntry> {
    let action =
        AuditAction::try_from(row.action_type.as_str()).map_err(AuditLogError::invalid_data)?;
    Ok(AuditEntry {
        id: AuditEntryId::from_uuid(row.id),
        actor: MemberId::from_uuid(row.user_id),
        action,
        detail: row.details,
        related_task: row.related_task_id.map(TaskId::from_uuid),
        recorded_at: row.created_at,
    })
}

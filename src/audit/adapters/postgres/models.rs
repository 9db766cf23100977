//! Diesel row models for the audit trail.

use super::schema::system_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for audit entries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = system_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Acting member.
    pub user_id: uuid::Uuid,
    /// Action kind.
    pub action_type: String,
    /// Human-readable description.
    pub details: String,
    /// Related task, if any.
    pub related_task_id: Option<uuid::Uuid>,
    /// Time of the action.
    pub created_at: DateTime<Utc>,
}

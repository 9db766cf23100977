//! Diesel row models for task persistence.

use super::schema::{achievement_reviews, activities, tasks, votes};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query, insert, and update row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Assigned member, if claimed.
    pub member_id: Option<uuid::Uuid>,
    /// Sum of votes, in half points.
    pub total_score_halves: i64,
    /// Settled score in half points.
    pub achieved_score_halves: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for votes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VoteRow {
    /// Voted task.
    pub task_id: uuid::Uuid,
    /// Voting member.
    pub user_id: uuid::Uuid,
    /// Vote in half points.
    pub score_halves: i16,
    /// Time of the latest vote.
    pub created_at: DateTime<Utc>,
}

/// Query and insert row for achievement reviews.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = achievement_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    /// Reviewed task.
    pub task_id: uuid::Uuid,
    /// Reviewing member.
    pub reviewer_id: uuid::Uuid,
    /// Review score.
    pub score: i16,
    /// Time of the latest review.
    pub created_at: DateTime<Utc>,
}

/// Query and insert row for activity reports.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Report identifier.
    pub id: uuid::Uuid,
    /// Reported task.
    pub task_id: uuid::Uuid,
    /// Submitting member.
    pub user_id: uuid::Uuid,
    /// Report title.
    pub title: String,
    /// Report body.
    pub content: String,
    /// Attachment URL.
    pub file_url: Option<String>,
    /// Attachment digest.
    pub file_sha256: Option<String>,
    /// Per-task sequence number.
    pub sequence: i32,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

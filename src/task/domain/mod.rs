//! Domain model for tasks, votes, reports, and peer review.
//!
//! Scores are exact: [`Points`] counts half points, so vote totals and
//! settlement never touch floating point.

mod activity;
mod color;
mod error;
mod ids;
mod score;
mod settlement;
mod task;
mod vote;

pub use activity::{
    ActivityReport, Attachment, NewActivityReport, PersistedReportData, ReportSequence,
};
pub use color::{
    AchievementRatio, RAMP_LIGHT_GREEN, RAMP_ORANGE, RAMP_RED, RAMP_TEAL, RAMP_YELLOW, Rgb,
    achievement_color, ramp_color,
};
pub use error::{ParsePointsError, TaskDomainError};
pub use ids::{ReportId, TaskId};
pub use score::{Points, ReviewScore, VoteScore};
pub use settlement::{Settlement, settle_achievement};
pub use task::{ClaimOutcome, PersistedTaskData, Task, TaskTitle};
pub use vote::{AchievementReview, Vote};

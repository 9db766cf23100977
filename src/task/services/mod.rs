//! Application services for the task board and score settlement.

mod board;
mod error;
mod settlement;
mod views;

pub use board::{
    ActivityFeedItem, AttachmentUpload, DEFAULT_AUDIT_FEED_LIMIT, ReportSubmission,
    TaskBoardService, TaskUpdate,
};
pub use error::{ErrorKind, TaskServiceError, TaskServiceResult};
pub use settlement::ScoreSettlementService;
pub use views::{
    Contribution, ContributionSummary, TaskBoardEntry, UNASSIGNED_LABEL, completion_percentage,
};

//! Repository port for activity reports.

use super::TaskRepositoryResult;
use crate::task::domain::{ActivityReport, NewActivityReport, TaskId};
use async_trait::async_trait;

/// Activity report persistence contract.
#[async_trait]
pub trait ActivityReportRepository: Send + Sync {
    /// Stores a report under the task's next sequence number, starting at 1.
    ///
    /// Sequence assignment and insertion are atomic.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn append_report(&self, report: NewActivityReport)
    -> TaskRepositoryResult<ActivityReport>;

    /// Returns a task's reports in sequence order.
    async fn reports_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<ActivityReport>>;

    /// Returns the number of reports on a task.
    async fn report_count(&self, task_id: TaskId) -> TaskRepositoryResult<u64>;
}

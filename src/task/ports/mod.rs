//! Port contracts for task persistence.
//!
//! Each aggregate has its own repository trait; [`TaskStore`] names the
//! combination services depend on, so one adapter can keep task rows and their
//! votes, reviews, and reports consistent.

pub mod activity;
pub mod repository;
pub mod reviews;
pub mod votes;

pub use activity::ActivityReportRepository;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use reviews::ReviewRepository;
pub use votes::VoteRepository;

/// Every persistence port of the task context.
pub trait TaskStore:
    TaskRepository + VoteRepository + ReviewRepository + ActivityReportRepository
{
}

impl<T> TaskStore for T where
    T: TaskRepository + VoteRepository + ReviewRepository + ActivityReportRepository
{
}

//! Read models assembled for the board and the contribution summary.

use crate::member::domain::MemberId;
use crate::task::domain::{
    ActivityReport, Points, ReviewScore, Rgb, Task, VoteScore, achievement_color,
};
use serde::Serialize;

/// Assignee label shown for tasks nobody holds.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// One row of the task board, personalised for the viewing caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBoardEntry {
    /// The task itself.
    pub task: Task,
    /// Display name of the assignee, or [`UNASSIGNED_LABEL`].
    pub assignee_name: String,
    /// The caller's own vote, if any.
    pub my_vote: Option<VoteScore>,
    /// The caller's own review, if any.
    pub my_review: Option<ReviewScore>,
    /// Activity reports in submission order.
    pub reports: Vec<ActivityReport>,
    /// Number of reviews received.
    pub review_count: u64,
}

impl TaskBoardEntry {
    /// Returns the progress colour for a settled task.
    ///
    /// Tasks without an achieved score or with a zero total have none.
    #[must_use]
    pub fn achievement_color(&self) -> Option<Rgb> {
        self.task
            .achieved_score()
            .and_then(|achieved| achievement_color(achieved, self.task.total_score()))
    }
}

/// Score totals of one assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    /// The assignee.
    pub member_id: MemberId,
    /// The assignee's display name.
    pub name: String,
    /// Sum of vote totals over the assignee's tasks.
    pub total: Points,
    /// Sum of settled scores over the assignee's tasks.
    pub achieved: Points,
    /// `achieved / total` as a whole percentage, rounded half up.
    pub percentage: u64,
}

impl Contribution {
    pub(crate) fn new(member_id: MemberId, name: String, total: Points, achieved: Points) -> Self {
        Self {
            member_id,
            name,
            total,
            achieved,
            percentage: completion_percentage(achieved, total),
        }
    }
}

/// Per-assignee contributions plus the project-wide total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionSummary {
    /// Assignees ordered by name.
    pub members: Vec<Contribution>,
    /// Sum of vote totals over all assigned tasks.
    pub project_total: Points,
}

/// Returns `round_half_up(100 × achieved ÷ total)`, or 0 for a zero total.
#[must_use]
pub fn completion_percentage(achieved: Points, total: Points) -> u64 {
    if total.is_zero() {
        return 0;
    }
    let divisor = u128::from(total.halves()).saturating_mul(2);
    let dividend = u128::from(achieved.halves())
        .saturating_mul(200)
        .saturating_add(u128::from(total.halves()));
    u64::try_from(dividend.div_euclid(divisor)).unwrap_or(u64::MAX)
}

//! Conversions between task domain values and Diesel rows.

use super::models::{ActivityRow, ReviewRow, TaskRow, VoteRow};
use crate::member::domain::MemberId;
use crate::task::{
    domain::{
        AchievementReview, ActivityReport, Attachment, PersistedReportData, PersistedTaskData,
        Points, ReportId, ReportSequence, ReviewScore, Task, TaskId, TaskTitle, Vote, VoteScore,
    },
    ports::{TaskRepositoryError, TaskRepositoryResult},
};

fn halves_to_column(points: Points) -> TaskRepositoryResult<i64> {
    i64::try_from(points.halves()).map_err(TaskRepositoryError::invalid_data)
}

fn column_to_points(halves: i64) -> TaskRepositoryResult<Points> {
    u64::try_from(halves)
        .map(Points::from_halves)
        .map_err(TaskRepositoryError::invalid_data)
}

pub(super) fn task_to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        member_id: task.assignee().map(MemberId::into_inner),
        total_score_halves: halves_to_column(task.total_score())?,
        achieved_score_halves: task.achieved_score().map(halves_to_column).transpose()?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

pub(super) fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        member_id,
        total_score_halves,
        achieved_score_halves,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::invalid_data)?,
        description,
        assignee: member_id.map(MemberId::from_uuid),
        total_score: column_to_points(total_score_halves)?,
        achieved_score: achieved_score_halves.map(column_to_points).transpose()?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

pub(super) fn vote_to_row(vote: &Vote) -> TaskRepositoryResult<VoteRow> {
    Ok(VoteRow {
        task_id: vote.task_id().into_inner(),
        user_id: vote.voter().into_inner(),
        score_halves: i16::try_from(vote.score().points().halves())
            .map_err(TaskRepositoryError::invalid_data)?,
        created_at: vote.cast_at(),
    })
}

pub(super) fn row_to_vote(row: VoteRow) -> TaskRepositoryResult<Vote> {
    let halves = u64::try_from(row.score_halves).map_err(TaskRepositoryError::invalid_data)?;
    let score =
        VoteScore::new(Points::from_halves(halves)).map_err(TaskRepositoryError::invalid_data)?;
    Ok(Vote::from_persisted(
        TaskId::from_uuid(row.task_id),
        MemberId::from_uuid(row.user_id),
        score,
        row.created_at,
    ))
}

pub(super) fn review_to_row(review: &AchievementReview) -> ReviewRow {
    ReviewRow {
        task_id: review.task_id().into_inner(),
        reviewer_id: review.reviewer().into_inner(),
        score: i16::from(review.score().value()),
        created_at: review.reviewed_at(),
    }
}

pub(super) fn row_to_review(row: ReviewRow) -> TaskRepositoryResult<AchievementReview> {
    let raw = u8::try_from(row.score).map_err(TaskRepositoryError::invalid_data)?;
    let score = ReviewScore::try_from(raw).map_err(TaskRepositoryError::invalid_data)?;
    Ok(AchievementReview::from_persisted(
        TaskId::from_uuid(row.task_id),
        MemberId::from_uuid(row.reviewer_id),
        score,
        row.created_at,
    ))
}

pub(super) fn report_to_row(report: &ActivityReport) -> TaskRepositoryResult<ActivityRow> {
    Ok(ActivityRow {
        id: report.id().into_inner(),
        task_id: report.task_id().into_inner(),
        user_id: report.author().into_inner(),
        title: report.title().to_owned(),
        content: report.content().to_owned(),
        file_url: report.attachment().map(|attachment| attachment.url.clone()),
        file_sha256: report.attachment().map(|attachment| attachment.sha256.clone()),
        sequence: i32::try_from(report.sequence().value())
            .map_err(TaskRepositoryError::invalid_data)?,
        created_at: report.created_at(),
    })
}

pub(super) fn row_to_report(row: ActivityRow) -> TaskRepositoryResult<ActivityReport> {
    let ActivityRow {
        id,
        task_id,
        user_id,
        title,
        content,
        file_url,
        file_sha256,
        sequence,
        created_at,
    } = row;

    let attachment = match (file_url, file_sha256) {
        (Some(url), Some(sha256)) => Some(Attachment { url, sha256 }),
        (None, None) => None,
        _ => {
            return Err(TaskRepositoryError::invalid_data(std::io::Error::other(
                "attachment URL and digest must be stored together",
            )));
        }
    };
    let raw_sequence = u32::try_from(sequence).map_err(TaskRepositoryError::invalid_data)?;

    Ok(ActivityReport::from_persisted(PersistedReportData {
        id: ReportId::from_uuid(id),
        task_id: TaskId::from_uuid(task_id),
        author: MemberId::from_uuid(user_id),
        title,
        content,
        attachment,
        sequence: ReportSequence::new(raw_sequence).map_err(TaskRepositoryError::invalid_data)?,
        created_at,
    }))
}

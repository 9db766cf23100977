//! `PostgreSQL` implementation of the task-context ports.

use super::{
    conversion::{
        report_to_row, review_to_row, row_to_report, row_to_review, row_to_task, row_to_vote,
        task_to_row, vote_to_row,
    },
    models::{ActivityRow, ReviewRow, TaskRow, VoteRow},
    schema::{achievement_reviews, activities, tasks, votes},
};
use crate::member::domain::MemberId;
use crate::postgres::TeamboardPgPool;
use crate::task::{
    domain::{
        AchievementReview, ActivityReport, NewActivityReport, Points, ReportSequence, Task,
        TaskId, Vote,
    },
    ports::{
        ActivityReportRepository, ReviewRepository, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, VoteRepository,
    },
};
use async_trait::async_trait;
use diesel::dsl::{count_star, max, sum};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed store for tasks, votes, reviews, and reports.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TeamboardPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TeamboardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

/// Locks the task row for the rest of the transaction.
fn lock_task(connection: &mut PgConnection, task_id: TaskId) -> TaskRepositoryResult<()> {
    tasks::table
        .find(task_id.into_inner())
        .select(tasks::id)
        .for_update()
        .first::<uuid::Uuid>(connection)
        .optional()?
        .map(|_| ())
        .ok_or(TaskRepositoryError::NotFound(task_id))
}

#[async_trait]
impl TaskRepository for PostgresTaskStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_row(task)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&row)
                .execute(connection)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let task_uuid = id.into_inner();
                diesel::delete(votes::table.filter(votes::task_id.eq(task_uuid))).execute(tx)?;
                diesel::delete(
                    achievement_reviews::table.filter(achievement_reviews::task_id.eq(task_uuid)),
                )
                .execute(tx)?;
                diesel::delete(activities::table.filter(activities::task_id.eq(task_uuid)))
                    .execute(tx)?;
                let deleted = diesel::delete(tasks::table.find(task_uuid)).execute(tx)?;
                if deleted == 0 {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_newest_first(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl VoteRepository for PostgresTaskStore {
    async fn upsert_vote(&self, vote: &Vote) -> TaskRepositoryResult<Points> {
        let task_id = vote.task_id();
        let row = vote_to_row(vote)?;
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                lock_task(tx, task_id)?;
                diesel::insert_into(votes::table)
                    .values(&row)
                    .on_conflict((votes::task_id, votes::user_id))
                    .do_update()
                    .set((
                        votes::score_halves.eq(row.score_halves),
                        votes::created_at.eq(row.created_at),
                    ))
                    .execute(tx)?;
                let total: Option<i64> = votes::table
                    .filter(votes::task_id.eq(task_id.into_inner()))
                    .select(sum(votes::score_halves))
                    .first(tx)?;
                u64::try_from(total.unwrap_or(0))
                    .map(Points::from_halves)
                    .map_err(TaskRepositoryError::invalid_data)
            })
        })
        .await
    }

    async fn votes_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Vote>> {
        self.run_blocking(move |connection| {
            votes::table
                .filter(votes::task_id.eq(task_id.into_inner()))
                .select(VoteRow::as_select())
                .load::<VoteRow>(connection)?
                .into_iter()
                .map(row_to_vote)
                .collect()
        })
        .await
    }

    async fn votes_by_voter(&self, voter: MemberId) -> TaskRepositoryResult<Vec<Vote>> {
        self.run_blocking(move |connection| {
            votes::table
                .filter(votes::user_id.eq(voter.into_inner()))
                .select(VoteRow::as_select())
                .load::<VoteRow>(connection)?
                .into_iter()
                .map(row_to_vote)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ReviewRepository for PostgresTaskStore {
    async fn upsert_review(&self, review: &AchievementReview) -> TaskRepositoryResult<()> {
        let task_id = review.task_id();
        let row = review_to_row(review);
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                lock_task(tx, task_id)?;
                diesel::insert_into(achievement_reviews::table)
                    .values(&row)
                    .on_conflict((achievement_reviews::task_id, achievement_reviews::reviewer_id))
                    .do_update()
                    .set((
                        achievement_reviews::score.eq(row.score),
                        achievement_reviews::created_at.eq(row.created_at),
                    ))
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn reviews_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<AchievementReview>> {
        self.run_blocking(move |connection| {
            achievement_reviews::table
                .filter(achievement_reviews::task_id.eq(task_id.into_inner()))
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(connection)?
                .into_iter()
                .map(row_to_review)
                .collect()
        })
        .await
    }

    async fn reviews_by_reviewer(
        &self,
        reviewer: MemberId,
    ) -> TaskRepositoryResult<Vec<AchievementReview>> {
        self.run_blocking(move |connection| {
            achievement_reviews::table
                .filter(achievement_reviews::reviewer_id.eq(reviewer.into_inner()))
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(connection)?
                .into_iter()
                .map(row_to_review)
                .collect()
        })
        .await
    }

    async fn review_counts(&self) -> TaskRepositoryResult<HashMap<TaskId, u64>> {
        self.run_blocking(move |connection| {
            achievement_reviews::table
                .group_by(achievement_reviews::task_id)
                .select((achievement_reviews::task_id, count_star()))
                .load::<(uuid::Uuid, i64)>(connection)?
                .into_iter()
                .map(|(task_uuid, count)| {
                    u64::try_from(count)
                        .map(|total| (TaskId::from_uuid(task_uuid), total))
                        .map_err(TaskRepositoryError::invalid_data)
                })
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ActivityReportRepository for PostgresTaskStore {
    async fn append_report(
        &self,
        report: NewActivityReport,
    ) -> TaskRepositoryResult<ActivityReport> {
        let task_id = report.task_id();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                lock_task(tx, task_id)?;
                let latest: Option<i32> = activities::table
                    .filter(activities::task_id.eq(task_id.into_inner()))
                    .select(max(activities::sequence))
                    .first(tx)?;
                let sequence = match latest {
                    Some(value) => u32::try_from(value)
                        .map_err(TaskRepositoryError::invalid_data)
                        .and_then(|raw| {
                            ReportSequence::new(raw).map_err(TaskRepositoryError::invalid_data)
                        })?
                        .next(),
                    None => ReportSequence::FIRST,
                };
                let stored = report.into_report(sequence);
                let row = report_to_row(&stored)?;
                diesel::insert_into(activities::table)
                    .values(&row)
                    .execute(tx)?;
                Ok(stored)
            })
        })
        .await
    }

    async fn reports_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<ActivityReport>> {
        self.run_blocking(move |connection| {
            activities::table
                .filter(activities::task_id.eq(task_id.into_inner()))
                .order(activities::sequence.asc())
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)?
                .into_iter()
                .map(row_to_report)
                .collect()
        })
        .await
    }

    async fn report_count(&self, task_id: TaskId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total: i64 = activities::table
                .filter(activities::task_id.eq(task_id.into_inner()))
                .count()
                .get_result(connection)?;
            u64::try_from(total).map_err(TaskRepositoryError::invalid_data)
        })
        .await
    }
}

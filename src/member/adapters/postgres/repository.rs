//! `PostgreSQL` repository implementation for members.

use super::{models::MemberRow, schema::users};
use crate::member::{
    domain::{Member, MemberId, MemberName},
    ports::{MemberRepository, MemberRepositoryError, MemberRepositoryResult},
};
use crate::postgres::TeamboardPgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed member repository.
#[derive(Debug, Clone)]
pub struct PostgresMemberRepository {
    pool: TeamboardPgPool,
}

impl PostgresMemberRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TeamboardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MemberRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MemberRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MemberRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MemberRepositoryError::persistence)?
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn store(&self, member: &Member) -> MemberRepositoryResult<()> {
        let member_id = member.id();
        let row = to_row(member);
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MemberRepositoryError::DuplicateMember(member_id)
                    }
                    _ => MemberRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<Member>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(MemberRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }

    async fn list_by_name(&self) -> MemberRepositoryResult<Vec<Member>> {
        self.run_blocking(move |connection| {
            users::table
                .order((users::name.asc(), users::id.asc()))
                .select(MemberRow::as_select())
                .load::<MemberRow>(connection)
                .map_err(MemberRepositoryError::persistence)?
                .into_iter()
                .map(row_to_member)
                .collect()
        })
        .await
    }

    async fn count(&self) -> MemberRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let total: i64 = users::table
                .count()
                .get_result(connection)
                .map_err(MemberRepositoryError::persistence)?;
            u64::try_from(total).map_err(MemberRepositoryError::persistence)
        })
        .await
    }
}

fn to_row(member: &Member) -> MemberRow {
    MemberRow {
        id: member.id().into_inner(),
        name: member.name().as_str().to_owned(),
        email: member.email().map(ToOwned::to_owned),
    }
}

fn row_to_member(row: MemberRow) -> MemberRepositoryResult<Member> {
    let MemberRow { id, name, email } = row;
    let member_name = MemberName::new(name).map_err(MemberRepositoryError::persistence)?;
    let member = Member::new(MemberId::from_uuid(id), member_name);
    Ok(match email {
        Some(address) => member.with_email(address),
        None => member,
    })
}

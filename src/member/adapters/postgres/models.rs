//! Diesel row models for member persistence.

use super::schema::users;
use diesel::prelude::*;

/// Query result and insert row for member records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Identity-provider user identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
}

//! Shared `PostgreSQL` connection pooling.

use crate::config::DatabaseSettings;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by every adapter.
pub type TeamboardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors returned while building the pool.
#[derive(Debug, Error)]
pub enum PoolSetupError {
    /// No database URL is configured.
    #[error("database.url is not configured")]
    MissingUrl,

    /// The pool could not establish its connections.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`PoolSetupError::MissingUrl`] when no URL is configured, or
/// [`PoolSetupError::Pool`] when connecting fails.
pub fn build_pool(settings: &DatabaseSettings) -> Result<TeamboardPgPool, PoolSetupError> {
    let url = settings.url.as_deref().ok_or(PoolSetupError::MissingUrl)?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    Ok(Pool::builder()
        .max_size(settings.pool_size)
        .build(manager)?)
}

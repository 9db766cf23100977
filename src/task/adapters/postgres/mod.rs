//! `PostgreSQL` adapters for task persistence.

mod conversion;
mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskStore;

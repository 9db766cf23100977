//! `PostgreSQL` adapters for member persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresMemberRepository;

//! Port contracts for member lookup.

pub mod repository;

pub use repository::{MemberRepository, MemberRepositoryError, MemberRepositoryResult};

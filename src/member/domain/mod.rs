//! Domain model for team members.

mod error;
mod ids;
mod member;

pub use error::MemberDomainError;
pub use ids::MemberId;
pub use member::{Member, MemberName};

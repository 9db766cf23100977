//! Port contracts for audit persistence.

pub mod repository;

pub use repository::{AuditLogError, AuditLogRepository, AuditLogResult};

//! Domain model for audit entries.

mod entry;

pub use entry::{AuditAction, AuditEntry, AuditEntryId, ParseAuditActionError};

//! Audit trail services.

mod logger;

pub use logger::AuditLogger;

//! Audit logging system for cnf-backup
//!
//! Records every snapshot and every retention deletion in an append-only
//! audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single record with timestamp, operation and the backup
//!   file it touched.
//! - `AuditLogger`: writes entries to the audit log file using a
//!   line-delimited JSON format (JSONL).
//!
//! # Example
//!
//! ```rust,ignore
//! use cnf_backup::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let report = manager.run(RunMode::Prune)?;
//! logger.log_batch(&AuditEntry::from_run(manager.source(), &report))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;

//! Audit entry data structures
//!
//! Defines the operations recorded for backup activity and the entry format
//! itself.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backup::RunReport;

/// Types of backup activity that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Source file was moved into a new backup
    Snapshot,
    /// Old backup was deleted by retention
    Delete,
    /// Old backup could not be deleted
    DeleteFailed,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Snapshot => write!(f, "SNAPSHOT"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::DeleteFailed => write!(f, "DELETE FAILED"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// File whose backups were affected
    pub source: String,

    /// Backup file the operation touched
    pub backup: String,

    /// Failure reason, for failed operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, source: &Path, backup: &Path, detail: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            source: source.display().to_string(),
            backup: backup.display().to_string(),
            detail,
        }
    }

    /// Entry for a snapshot move
    pub fn snapshot(source: &Path, backup: &Path) -> Self {
        Self::new(Operation::Snapshot, source, backup, None)
    }

    /// Entry for a deleted backup
    pub fn delete(source: &Path, backup: &Path) -> Self {
        Self::new(Operation::Delete, source, backup, None)
    }

    /// Entry for a backup that could not be deleted
    pub fn delete_failed(source: &Path, backup: &Path, reason: impl Into<String>) -> Self {
        Self::new(Operation::DeleteFailed, source, backup, Some(reason.into()))
    }

    /// Entries describing everything a run did
    pub fn from_run(source: &Path, report: &RunReport) -> Vec<Self> {
        let mut entries = vec![Self::snapshot(source, &report.snapshot)];
        entries.extend(report.deleted().iter().map(|path| Self::delete(source, path)));
        entries.extend(
            report
                .prune
                .failures
                .iter()
                .map(|failure| Self::delete_failed(source, &failure.path, &failure.reason)),
        );
        entries
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.backup
        );

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::{PruneOutcome, RunMode};
    use crate::error::PruneFailure;
    use std::path::PathBuf;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Snapshot.to_string(), "SNAPSHOT");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(Operation::DeleteFailed.to_string(), "DELETE FAILED");
    }

    #[test]
    fn test_from_run() {
        let report = RunReport {
            snapshot: PathBuf::from("/etc/my.cnf.20090101120000"),
            mode: RunMode::Prune,
            prune: PruneOutcome {
                deleted: vec![PathBuf::from("/etc/my.cnf.20040430185242")],
                failures: vec![PruneFailure {
                    path: PathBuf::from("/etc/my.cnf.20030430185242"),
                    reason: "permission denied".into(),
                }],
            },
        };

        let entries = AuditEntry::from_run(Path::new("/etc/my.cnf"), &report);
        let operations: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            operations,
            vec![Operation::Snapshot, Operation::Delete, Operation::DeleteFailed]
        );
        assert_eq!(entries[0].backup, "/etc/my.cnf.20090101120000");
        assert_eq!(entries[2].detail.as_deref(), Some("permission denied"));
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::delete_failed(
            Path::new("/etc/my.cnf"),
            Path::new("/etc/my.cnf.20040430185242"),
            "busy",
        );
        let output = entry.format_human_readable();
        assert!(output.contains("DELETE FAILED /etc/my.cnf.20040430185242 (busy)"));
    }

    #[test]
    fn test_serialization_skips_empty_detail() {
        let entry = AuditEntry::snapshot(Path::new("my.cnf"), Path::new("my.cnf.20080430185243"));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"snapshot\""));
        assert!(!json.contains("detail"));
    }
}

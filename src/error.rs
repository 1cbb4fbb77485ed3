//! Custom error types for cnf-backup
//!
//! This module defines the error hierarchy for the backup manager using
//! thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// A single deletion that failed during a prune pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneFailure {
    /// Backup that could not be removed
    pub path: PathBuf,
    /// Reason reported by the filesystem
    pub reason: String,
}

/// The main error type for backup operations
#[derive(Error, Debug)]
pub enum BackupError {
    /// Missing or semantically invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Source file missing or not a regular file
    #[error("No such file found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The snapshot move could not complete
    #[error("Snapshot failed moving {} to {}: {reason}", .from.display(), .to.display())]
    SnapshotFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// One or more old backups could not be deleted
    #[error("Failed to delete {} old backup(s)", .failures.len())]
    PruneWarning { failures: Vec<PruneFailure> },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl BackupError {
    /// Check if this is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this error is non-fatal
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::PruneWarning { .. })
    }
}

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for backup operations
pub type BackupResult<T> = Result<T, BackupError>;

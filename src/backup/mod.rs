//! Backup system for cnf-backup
//!
//! Rolling, timestamped backups of a single file with a fixed retention count.
//!
//! # Architecture
//!
//! - `BackupManager`: snapshots the source file, discovers its existing
//!   backups and prunes the ones beyond the retention count
//! - `BackupTimestamp`: the 14-digit `YYYYMMDDHHMMSS` filename suffix
//! - `BackupFs`: the filesystem operations the manager relies on
//!
//! # Backup Format
//!
//! A backup of `my.cnf` is the file itself, moved to `my.cnf.<timestamp>` in
//! the same directory, e.g. `my.cnf.20080430185243`.
//!
//! # Example
//!
//! ```rust,ignore
//! use cnf_backup::backup::{BackupManager, RunMode};
//!
//! let mut manager = BackupManager::new("/etc/mysql/my.cnf", 5)?;
//! let report = manager.run(RunMode::Prune)?;
//! println!("Backup saved to {}", report.snapshot.display());
//! ```

mod fs;
mod manager;
mod timestamp;

pub use fs::{parent_dir, BackupFs, OsFs};
pub use manager::{
    validate_release_count, BackupEntry, BackupManager, PruneOutcome, RunMode, RunReport,
    DEFAULT_RELEASE_COUNT,
};
pub use timestamp::{BackupTimestamp, TIMESTAMP_LEN};

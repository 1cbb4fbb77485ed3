//! cnf-backup - rolling timestamped backups for a single configuration file
//!
//! Each backup run moves the managed file to `<file>.<YYYYMMDDHHMMSS>` and
//! deletes the oldest backups beyond a retention count.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `backup`: snapshot, discovery and retention
//! - `config`: configuration and path management
//! - `error`: custom error types
//! - `audit`: audit log of snapshots and deletions
//! - `display`: terminal formatting
//! - `cli`: command handlers for the `cnf-backup` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use cnf_backup::backup::{BackupManager, RunMode};
//!
//! let mut manager = BackupManager::new("/etc/mysql/my.cnf", 5)?;
//! let report = manager.run(RunMode::Prune)?;
//! if let Some(warning) = report.prune_warning() {
//!     eprintln!("{}", warning);
//! }
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;

pub use backup::{BackupEntry, BackupManager, RunMode, RunReport};
pub use error::{BackupError, BackupResult};

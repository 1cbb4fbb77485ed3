//! Backup manager for cnf-backup
//!
//! Moves the managed file aside into a timestamped backup and enforces a
//! rolling retention count over the backups sitting next to it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use super::fs::{parent_dir, BackupFs, OsFs};
use super::timestamp::BackupTimestamp;
use crate::error::{BackupError, BackupResult, PruneFailure};

/// Number of backups kept when no count is given
pub const DEFAULT_RELEASE_COUNT: usize = 5;

/// One backup file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    /// Full path to the backup
    pub path: PathBuf,
    /// Timestamp parsed from the filename suffix
    pub timestamp: BackupTimestamp,
}

impl BackupEntry {
    /// Backup filename without its directory
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// How much of the backup cycle `run` performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Snapshot, then delete backups beyond the retention count
    #[default]
    Prune,
    /// Snapshot only
    NoDelete,
}

/// Outcome of a deletion pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Backups that were removed
    pub deleted: Vec<PathBuf>,
    /// Backups that could not be removed
    pub failures: Vec<PruneFailure>,
}

impl PruneOutcome {
    /// Aggregate warning for failed deletions, if any
    pub fn warning(&self) -> Option<BackupError> {
        if self.failures.is_empty() {
            None
        } else {
            Some(BackupError::PruneWarning {
                failures: self.failures.clone(),
            })
        }
    }
}

/// Outcome of a full `run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The backup created by this run
    pub snapshot: PathBuf,
    /// Mode the run executed in
    pub mode: RunMode,
    /// Result of the deletion pass (empty in `NoDelete` mode)
    pub prune: PruneOutcome,
}

impl RunReport {
    /// Backups deleted by this run
    pub fn deleted(&self) -> &[PathBuf] {
        &self.prune.deleted
    }

    /// Non-fatal warning raised by failed deletions
    pub fn prune_warning(&self) -> Option<BackupError> {
        self.prune.warning()
    }
}

/// Validate a signed release count coming from outside the type system
pub fn validate_release_count(count: i64) -> BackupResult<usize> {
    usize::try_from(count).map_err(|_| {
        BackupError::InvalidArgument(format!(
            "release count must be zero or greater, got {}",
            count
        ))
    })
}

/// Manages the timestamped backups of one source file
pub struct BackupManager<F: BackupFs = OsFs> {
    /// File being backed up
    source: PathBuf,
    /// Number of backups to retain
    release_count: usize,
    /// Backups found by the last discovery, newest first
    backups: Vec<BackupEntry>,
    /// Filesystem access
    fs: F,
}

impl BackupManager<OsFs> {
    /// Create a manager for `source` on the real filesystem
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the path is empty, `FileNotFound` if it is not an
    /// existing regular file.
    pub fn new(source: impl AsRef<Path>, release_count: usize) -> BackupResult<Self> {
        Self::with_fs(source, release_count, OsFs)
    }
}

impl<F: BackupFs> BackupManager<F> {
    /// Create a manager using the given filesystem
    pub fn with_fs(source: impl AsRef<Path>, release_count: usize, fs: F) -> BackupResult<Self> {
        let source = source.as_ref();
        if source.as_os_str().is_empty() {
            return Err(BackupError::InvalidArgument(
                "a source file path is required".into(),
            ));
        }
        if !fs.is_file(source) {
            return Err(BackupError::FileNotFound(source.to_path_buf()));
        }

        Ok(Self {
            source: source.to_path_buf(),
            release_count,
            backups: Vec::new(),
            fs,
        })
    }

    /// Path of the managed file
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of backups to retain
    pub fn release_count(&self) -> usize {
        self.release_count
    }

    /// Change the retention count; takes effect on the next keep/delete query
    pub fn set_release_count(&mut self, release_count: usize) {
        self.release_count = release_count;
    }

    /// Filesystem handle used by this manager
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Directory holding the source file and its backups
    pub fn backup_dir(&self) -> PathBuf {
        parent_dir(&self.source)
    }

    /// Source filename, the common prefix of every backup
    pub fn basename(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Path a snapshot taken at `timestamp` would be written to
    pub fn snapshot_path(&self, timestamp: BackupTimestamp) -> PathBuf {
        let mut path: OsString = self.source.as_os_str().to_owned();
        path.push(".");
        path.push(timestamp.to_string());
        PathBuf::from(path)
    }

    /// Scan the backup directory and replace the discovered backups
    ///
    /// Names of the form `<basename>.<suffix>` are candidates; any whose
    /// suffix is not a 14-digit timestamp is skipped without error. The result
    /// is ordered newest first, with equal timestamps left in listing order.
    pub fn find_all_releases(&mut self) -> BackupResult<&[BackupEntry]> {
        let dir = self.backup_dir();
        let prefix = format!("{}.", self.basename());

        let names = self.fs.list_dir(&dir).map_err(|e| {
            BackupError::Io(format!(
                "Failed to read backup directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut backups = Vec::new();
        for name in names {
            let Some(suffix) = name.strip_prefix(&prefix) else {
                continue;
            };
            let Some(timestamp) = BackupTimestamp::parse(suffix) else {
                debug!(file = %name, "skipping backup with malformed timestamp");
                continue;
            };
            // Sibling of the source, so paths compare equal to snapshot paths
            let path = self.source.with_file_name(&name);
            if !self.fs.is_file(&path) {
                continue;
            }
            backups.push(BackupEntry { path, timestamp });
        }

        // Stable, so equal timestamps stay in listing order
        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        debug!(
            source = %self.source.display(),
            count = backups.len(),
            "discovered backups"
        );
        self.backups = backups;
        Ok(&self.backups)
    }

    /// Backups found by the last discovery, newest first
    pub fn backups(&self) -> &[BackupEntry] {
        &self.backups
    }

    /// The newest `release_count` discovered backups
    pub fn keep_list(&self) -> &[BackupEntry] {
        &self.backups[..self.keep_boundary()]
    }

    /// Discovered backups older than the keep list
    pub fn delete_list(&self) -> &[BackupEntry] {
        &self.backups[self.keep_boundary()..]
    }

    fn keep_boundary(&self) -> usize {
        self.release_count.min(self.backups.len())
    }

    /// Delete every backup in the delete list
    ///
    /// Each deletion is attempted independently; failures are collected
    /// rather than returned.
    pub fn delete_old_backups(&self) -> PruneOutcome {
        self.prune_except(None)
    }

    fn prune_except(&self, protected: Option<&Path>) -> PruneOutcome {
        let mut outcome = PruneOutcome::default();

        for entry in self.delete_list() {
            if entry.path == self.source || protected == Some(entry.path.as_path()) {
                continue;
            }
            match self.fs.remove_file(&entry.path) {
                Ok(()) => {
                    info!(file = %entry.path.display(), "deleted old backup");
                    outcome.deleted.push(entry.path.clone());
                }
                Err(e) => {
                    warn!(file = %entry.path.display(), error = %e, "failed to delete old backup");
                    outcome.failures.push(PruneFailure {
                        path: entry.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    /// Move the source file into a backup stamped with `timestamp`
    ///
    /// # Errors
    ///
    /// `SnapshotFailed` if the destination already exists or the move fails.
    pub fn snapshot(&self, timestamp: BackupTimestamp) -> BackupResult<PathBuf> {
        let destination = self.snapshot_path(timestamp);

        if self.fs.exists(&destination) {
            return Err(BackupError::SnapshotFailed {
                from: self.source.clone(),
                to: destination,
                reason: "destination already exists".into(),
            });
        }

        self.fs
            .rename(&self.source, &destination)
            .map_err(|e| BackupError::SnapshotFailed {
                from: self.source.clone(),
                to: destination.clone(),
                reason: e.to_string(),
            })?;

        info!(
            source = %self.source.display(),
            backup = %destination.display(),
            "created backup"
        );
        Ok(destination)
    }

    /// Snapshot the source file and, unless told not to, prune old backups
    pub fn run(&mut self, mode: RunMode) -> BackupResult<RunReport> {
        self.run_at(mode, chrono::Local::now().naive_local())
    }

    /// [`run`](Self::run) with an explicit snapshot time
    pub fn run_at(&mut self, mode: RunMode, now: NaiveDateTime) -> BackupResult<RunReport> {
        let snapshot = self.snapshot(BackupTimestamp::from_datetime(now))?;

        let prune = match mode {
            RunMode::NoDelete => PruneOutcome::default(),
            RunMode::Prune => {
                self.find_all_releases()?;
                self.prune_except(Some(snapshot.as_path()))
            }
        };

        Ok(RunReport {
            snapshot,
            mode,
            prune,
        })
    }
}

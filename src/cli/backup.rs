//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use std::path::PathBuf;

use clap::Subcommand;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::backup::{validate_release_count, BackupManager, RunMode};
use crate::config::paths::BackupPaths;
use crate::config::settings::Settings;
use crate::display::{format_backup_list, format_prune_outcome, format_run_report};
use crate::error::BackupResult;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Move the file into a new timestamped backup and prune old ones
    Run {
        /// File to back up
        file: PathBuf,

        /// Number of backups to keep (defaults to the configured count)
        #[arg(short, long, allow_negative_numbers = true)]
        releases: Option<i64>,

        /// Create the backup without deleting old ones
        #[arg(long)]
        no_delete: bool,
    },

    /// List existing backups of a file, newest first
    List {
        /// File whose backups to list
        file: PathBuf,

        /// Number of backups retention would keep
        #[arg(short, long, allow_negative_numbers = true)]
        releases: Option<i64>,
    },

    /// Delete backups beyond the retention count without creating a new one
    Prune {
        /// File whose backups to prune
        file: PathBuf,

        /// Number of backups to keep
        #[arg(short, long, allow_negative_numbers = true)]
        releases: Option<i64>,

        /// Skip confirmation and delete
        #[arg(short, long)]
        force: bool,
    },

    /// Show recent backup activity from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &BackupPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> BackupResult<()> {
    match cmd {
        BackupCommands::Run {
            file,
            releases,
            no_delete,
        } => {
            let release_count = resolve_release_count(settings, releases)?;
            let mut manager = BackupManager::new(&file, release_count)?;
            let mode = if no_delete {
                RunMode::NoDelete
            } else {
                RunMode::Prune
            };

            let report = manager.run(mode)?;
            print!("{}", format_run_report(&report));

            if settings.audit_enabled {
                record(paths, &AuditEntry::from_run(manager.source(), &report));
            }
            if let Some(warning) = report.prune_warning() {
                warn!("{}", warning);
            }
        }

        BackupCommands::List { file, releases } => {
            let release_count = resolve_release_count(settings, releases)?;
            let mut manager = BackupManager::new(&file, release_count)?;
            let backups = manager.find_all_releases()?;

            println!("Backups of {}", file.display());
            println!();
            println!("{}", format_backup_list(backups, release_count));
        }

        BackupCommands::Prune {
            file,
            releases,
            force,
        } => {
            let release_count = resolve_release_count(settings, releases)?;
            let mut manager = BackupManager::new(&file, release_count)?;
            manager.find_all_releases()?;

            let doomed = manager.delete_list();
            if doomed.is_empty() {
                println!("No backups to prune.");
                println!(
                    "Retention keeps {} backup(s); {} found.",
                    release_count,
                    manager.backups().len()
                );
                return Ok(());
            }

            if !force {
                println!("Backups to be deleted (keeping {}):", release_count);
                for entry in doomed {
                    println!("  {}", entry.path.display());
                }
                println!();
                println!("To delete them, run again with --force flag:");
                println!("  cnf-backup prune {} --force", file.display());
                return Ok(());
            }

            let outcome = manager.delete_old_backups();
            print!("{}", format_prune_outcome(&outcome));

            if settings.audit_enabled {
                let source = manager.source();
                let mut entries: Vec<AuditEntry> = outcome
                    .deleted
                    .iter()
                    .map(|path| AuditEntry::delete(source, path))
                    .collect();
                entries.extend(
                    outcome
                        .failures
                        .iter()
                        .map(|f| AuditEntry::delete_failed(source, &f.path, &f.reason)),
                );
                record(paths, &entries);
            }
            if let Some(warning) = outcome.warning() {
                warn!("{}", warning);
            }
        }

        BackupCommands::History { limit } => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(limit)?;

            if entries.is_empty() {
                println!("No backup activity recorded.");
                return Ok(());
            }

            for entry in &entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

/// Pick the retention count from the flag, falling back to settings
fn resolve_release_count(settings: &Settings, releases: Option<i64>) -> BackupResult<usize> {
    match releases {
        Some(count) => validate_release_count(count),
        None => settings.retention(),
    }
}

/// Append entries to the audit log; failures are logged, not returned
fn record(paths: &BackupPaths, entries: &[AuditEntry]) {
    let result = paths
        .ensure_directories()
        .and_then(|_| AuditLogger::new(paths.audit_log()).log_batch(entries));
    if let Err(e) = result {
        warn!(log = %paths.audit_log().display(), error = %e, "failed to write audit log");
    }
}

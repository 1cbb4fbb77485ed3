//! Path management for cnf-backup
//!
//! Provides XDG-compliant resolution of the directory holding the settings
//! file and the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `CNF_BACKUP_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cnf-backup` or `~/.config/cnf-backup`
//! 3. Windows: `%APPDATA%\cnf-backup`

use std::path::PathBuf;

use crate::error::BackupError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "CNF_BACKUP_CONFIG_DIR";

/// Manages all paths used by cnf-backup itself
#[derive(Debug, Clone)]
pub struct BackupPaths {
    /// Base directory for settings and the audit log
    base_dir: PathBuf,
}

impl BackupPaths {
    /// Create a new BackupPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, BackupError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BackupPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/cnf-backup/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), BackupError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BackupError::Io(format!("Failed to create config directory: {}", e)))
    }
}

/// Resolve the default config directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BackupError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join("cnf-backup"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| BackupError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("cnf-backup"))
}

/// Resolve the default config directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BackupError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BackupError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("cnf-backup"))
}

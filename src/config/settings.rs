//! User settings for cnf-backup
//!
//! Persists the default retention count and whether backup activity is
//! recorded in the audit log.

use serde::{Deserialize, Serialize};

use super::paths::BackupPaths;
use crate::backup::{validate_release_count, DEFAULT_RELEASE_COUNT};
use crate::error::BackupError;

/// User settings for cnf-backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of backups to keep per file (negative values are rejected on load)
    #[serde(default = "default_release_count")]
    pub release_count: i64,

    /// Whether snapshots and deletions are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_release_count() -> i64 {
    DEFAULT_RELEASE_COUNT as i64
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            release_count: default_release_count(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &BackupPaths) -> Result<Self, BackupError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BackupError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BackupError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.retention()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BackupPaths) -> Result<(), BackupError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BackupError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BackupError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Validated retention count
    pub fn retention(&self) -> Result<usize, BackupError> {
        validate_release_count(self.release_count).map_err(|_| {
            BackupError::Config(format!(
                "release_count must be zero or greater, got {}",
                self.release_count
            ))
        })
    }
}

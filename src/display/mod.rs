//! Display formatting for terminal output
//!
//! Provides utilities for formatting backups and run results for terminal
//! display.

pub mod backup;

pub use backup::{format_backup_list, format_prune_outcome, format_run_report};

//! Backup display formatting
//!
//! Formats discovered backups and run results for terminal output.

use crate::backup::{BackupEntry, PruneOutcome, RunMode, RunReport};

/// Format discovered backups as a table, marking which ones retention keeps
///
/// `entries` must be ordered newest first; the first `keep` rows are marked
/// as kept.
pub fn format_backup_list(entries: &[BackupEntry], keep: usize) -> String {
    if entries.is_empty() {
        return "No backups found.".to_string();
    }

    let name_width = entries
        .iter()
        .map(|e| e.filename().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<name_width$}  {:<19}  {}\n",
        "#",
        "File",
        "Created",
        "Retention",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<name_width$}  {:-<19}  {:-<9}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (i, entry) in entries.iter().enumerate() {
        // Stamps with out-of-range fields are still valid backups
        let created = entry
            .timestamp
            .to_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| entry.timestamp.to_string());
        let marker = if i < keep { "keep" } else { "delete" };

        output.push_str(&format!(
            "{:>3}  {:<name_width$}  {:<19}  {}\n",
            i + 1,
            entry.filename(),
            created,
            marker,
            name_width = name_width,
        ));
    }

    let deleting = entries.len().saturating_sub(keep);
    output.push_str(&format!(
        "\nTotal: {} backup(s), {} kept, {} to delete\n",
        entries.len(),
        entries.len() - deleting,
        deleting
    ));

    output
}

/// Format the outcome of a deletion pass
pub fn format_prune_outcome(outcome: &PruneOutcome) -> String {
    let mut output = String::new();

    if outcome.deleted.is_empty() {
        output.push_str("No old backups deleted.\n");
    } else {
        output.push_str(&format!("Deleted {} old backup(s):\n", outcome.deleted.len()));
        for path in &outcome.deleted {
            output.push_str(&format!("  {}\n", path.display()));
        }
    }

    if !outcome.failures.is_empty() {
        output.push_str(&format!(
            "Warning: {} backup(s) could not be deleted:\n",
            outcome.failures.len()
        ));
        for failure in &outcome.failures {
            output.push_str(&format!(
                "  {}: {}\n",
                failure.path.display(),
                failure.reason
            ));
        }
    }

    output
}

/// Format the summary of a full run
pub fn format_run_report(report: &RunReport) -> String {
    let mut output = format!("Backup created: {}\n", report.snapshot.display());
    match report.mode {
        RunMode::NoDelete => output.push_str("Retention skipped (--no-delete).\n"),
        RunMode::Prune => output.push_str(&format_prune_outcome(&report.prune)),
    }
    output
}

//! Output formatting utilities for the CLI.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::services::{DaemonStatus, ForwardReport, ReverseReport, SyncReport};

/// Result of a command that can be printed for humans or as JSON.
pub trait CommandOutput: Serialize {
    /// Render for a terminal.
    fn to_human(&self) -> String;

    /// Render as JSON.
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print a result in the requested format.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Two-column counter table.
fn counter_table(rows: &[(&str, usize)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("RESULT"), Cell::new("COUNT")]);
    for (label, count) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

impl CommandOutput for ForwardReport {
    fn to_human(&self) -> String {
        let table = counter_table(&[
            ("Issues seen", self.issues_seen),
            ("Pull requests skipped", self.pull_requests_skipped),
            ("Tasks created", self.created),
            ("Tasks updated", self.updated),
            ("Tasks closed", self.closed),
            ("Tasks reopened", self.reopened),
            ("Unchanged", self.unchanged),
            ("Failed", self.failed),
        ]);
        format!("GitHub → Todoist\n{table}")
    }
}

impl CommandOutput for ReverseReport {
    fn to_human(&self) -> String {
        let table = counter_table(&[
            ("Tasks seen", self.tasks_seen),
            ("Unlinked tasks", self.unlinked),
            ("Issues closed", self.closed),
            ("Issues reopened", self.reopened),
            ("Unchanged", self.unchanged),
            ("Failed", self.failed),
        ]);
        format!("Todoist → GitHub\n{table}")
    }
}

impl CommandOutput for SyncReport {
    fn to_human(&self) -> String {
        format!("{}\n\n{}", self.forward.to_human(), self.reverse.to_human())
    }
}

/// Final state printed when the daemon exits.
#[derive(Debug, Serialize)]
pub struct DaemonSummary {
    /// Passes started.
    pub total_runs: u64,
    /// Passes that returned a report.
    pub successful_runs: u64,
    /// Passes that failed.
    pub failed_runs: u64,
    /// Error of the most recent failed pass.
    pub last_error: Option<String>,
    /// Report of the most recent successful pass.
    pub last_report: Option<SyncReport>,
}

impl From<DaemonStatus> for DaemonSummary {
    fn from(status: DaemonStatus) -> Self {
        Self {
            total_runs: status.total_runs,
            successful_runs: status.successful_runs,
            failed_runs: status.failed_runs,
            last_error: status.last_error,
            last_report: status.last_report,
        }
    }
}

impl CommandOutput for DaemonSummary {
    fn to_human(&self) -> String {
        let runs = usize::try_from(self.total_runs).unwrap_or(usize::MAX);
        let ok = usize::try_from(self.successful_runs).unwrap_or(usize::MAX);
        let failed = usize::try_from(self.failed_runs).unwrap_or(usize::MAX);
        let mut out = format!(
            "Daemon stopped\n{}",
            counter_table(&[("Passes", runs), ("Succeeded", ok), ("Failed", failed)])
        );
        if let Some(err) = &self.last_error {
            out.push_str(&format!("\nLast error: {err}"));
        }
        out
    }
}

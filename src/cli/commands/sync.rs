//! One-shot sync commands.

use anyhow::{Context, Result};

use crate::cli::output::output;
use crate::domain::models::Config;

use super::build_service;

/// Which passes a one-shot run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Forward pass, then reverse pass.
    Full,
    /// Forward pass only.
    GitHubOnly,
    /// Reverse pass only.
    TodoistOnly,
}

/// Run one pass set and print its report.
pub async fn execute(config: &Config, mode: SyncMode, json: bool) -> Result<()> {
    let service = build_service(config).await?;

    match mode {
        SyncMode::Full => {
            let report = service.full_sync().await.context("Full sync failed")?;
            output(&report, json);
        }
        SyncMode::GitHubOnly => {
            let report = service
                .sync_from_github()
                .await
                .context("GitHub → Todoist sync failed")?;
            output(&report, json);
        }
        SyncMode::TodoistOnly => {
            let report = service
                .sync_to_github()
                .await
                .context("Todoist → GitHub sync failed")?;
            output(&report, json);
        }
    }

    Ok(())
}

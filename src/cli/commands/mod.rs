//! Command handlers.

pub mod daemon;
pub mod sync;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::{GitHubClient, TodoistClient};
use crate::domain::models::Config;
use crate::services::{PlanOptions, SyncService};

/// Service wired to the live GitHub and Todoist APIs.
pub type LiveSyncService = SyncService<GitHubClient, TodoistClient>;

/// Build the HTTP clients and resolve the target project.
pub async fn build_service(config: &Config) -> Result<LiveSyncService> {
    let github = GitHubClient::new(&config.github).context("Failed to build GitHub client")?;
    let todoist = TodoistClient::new(&config.todoist).context("Failed to build Todoist client")?;
    info!(
        repository = %github.repository(),
        project = %config.todoist.project_name,
        "connecting to GitHub and Todoist"
    );

    let options = PlanOptions {
        update_labels: config.sync.update_labels,
    };
    SyncService::new(
        Arc::new(github),
        Arc::new(todoist),
        &config.todoist.project_name,
        options,
    )
    .await
    .context("Failed to initialize sync service")
}

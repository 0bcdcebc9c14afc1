//! Recurring sync command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::output::{output, DaemonSummary};
use crate::domain::models::Config;
use crate::services::{SyncDaemon, SyncDaemonConfig};

use super::build_service;

/// Run the sync loop until Ctrl-C or SIGTERM, then print a summary.
pub async fn execute(
    config: &Config,
    interval_minutes: Option<u64>,
    skip_initial: bool,
    json: bool,
) -> Result<()> {
    let interval = match interval_minutes {
        Some(minutes) => minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .with_context(|| format!("Interval of {minutes} minutes is too large"))?,
        None => config.sync.interval(),
    };
    let service = build_service(config).await?;

    let daemon = SyncDaemon::new(
        Arc::new(service),
        SyncDaemonConfig {
            interval,
            run_on_startup: config.sync.run_on_startup && !skip_initial,
        },
    );

    daemon.run_until(shutdown_signal()).await;

    output(&DaemonSummary::from(daemon.status().await), json);
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C"),
        () = terminate => info!("received SIGTERM"),
    }
}

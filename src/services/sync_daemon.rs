//! Recurring sync daemon.
//!
//! Runs a full sync on a fixed interval until stopped. A stop request ends
//! the wait for the next tick immediately, but a pass that is already
//! running always finishes first.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, RwLock};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::domain::models::MAX_INTERVAL_MINUTES;
use crate::domain::ports::{IssueGateway, TaskGateway};
use crate::services::sync_service::{SyncReport, SyncService};

/// Longest wait between passes; longer intervals are clamped to it.
pub const MAX_INTERVAL: Duration = Duration::from_secs(MAX_INTERVAL_MINUTES * 60);

/// Shortest wait between passes.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for the sync daemon.
#[derive(Debug, Clone)]
pub struct SyncDaemonConfig {
    /// Interval between full passes.
    pub interval: Duration,
    /// Whether to run a pass immediately on start.
    pub run_on_startup: bool,
}

impl Default for SyncDaemonConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15 * 60),
            run_on_startup: true,
        }
    }
}

impl SyncDaemonConfig {
    /// Create config with custom interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }
}

/// Status of the sync daemon.
#[derive(Debug, Clone, Default)]
pub struct DaemonStatus {
    /// Whether the loop is running.
    pub running: bool,
    /// Total passes started.
    pub total_runs: u64,
    /// Passes that completed without a pass-fatal error.
    pub successful_runs: u64,
    /// Passes that hit a pass-fatal error.
    pub failed_runs: u64,
    /// When the last pass finished.
    pub last_run_at: Option<DateTime<Utc>>,
    /// Report of the last successful pass.
    pub last_report: Option<SyncReport>,
    /// Error of the last failed pass.
    pub last_error: Option<String>,
}

/// Handle to control the daemon from another task.
#[derive(Clone)]
pub struct DaemonHandle {
    stop_tx: Arc<watch::Sender<bool>>,
    status: Arc<RwLock<DaemonStatus>>,
}

impl DaemonHandle {
    /// Request the daemon to stop. Safe to call more than once.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Check if stop was requested.
    pub fn is_stop_requested(&self) -> bool {
        *self.stop_tx.borrow()
    }

    /// Get current daemon status.
    pub async fn status(&self) -> DaemonStatus {
        self.status.read().await.clone()
    }
}

/// Runs [`SyncService::full_sync`] on a timer.
pub struct SyncDaemon<I: IssueGateway, T: TaskGateway> {
    service: Arc<SyncService<I, T>>,
    config: SyncDaemonConfig,
    status: Arc<RwLock<DaemonStatus>>,
    stop_tx: Arc<watch::Sender<bool>>,
}

impl<I: IssueGateway, T: TaskGateway> SyncDaemon<I, T> {
    /// Create a new daemon.
    pub fn new(service: Arc<SyncService<I, T>>, config: SyncDaemonConfig) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            service,
            config,
            status: Arc::new(RwLock::new(DaemonStatus::default())),
            stop_tx: Arc::new(stop_tx),
        }
    }

    /// Get a handle to control the daemon.
    pub fn handle(&self) -> DaemonHandle {
        DaemonHandle {
            stop_tx: Arc::clone(&self.stop_tx),
            status: Arc::clone(&self.status),
        }
    }

    /// Get configuration.
    pub const fn config(&self) -> &SyncDaemonConfig {
        &self.config
    }

    /// Run until [`DaemonHandle::stop`] is called.
    pub async fn run(&self) {
        let mut stop_rx = self.stop_tx.subscribe();
        if *stop_rx.borrow_and_update() {
            return;
        }

        self.status.write().await.running = true;
        info!(interval_secs = self.config.interval.as_secs(), "sync daemon started");
        if self.config.interval > MAX_INTERVAL {
            warn!(max_secs = MAX_INTERVAL.as_secs(), "sync interval too long, clamping");
        }

        if self.config.run_on_startup {
            info!("running initial sync");
            self.run_pass().await;
        }

        let period = self.config.interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *stop_rx.borrow_and_update() {
                break;
            }
            tokio::select! {
                biased;
                // Err means every sender is gone, which also ends the loop.
                _ = stop_rx.changed() => break,
                _ = ticker.tick() => {
                    info!("running scheduled sync");
                    self.run_pass().await;
                }
            }
        }

        self.status.write().await.running = false;
        info!("sync daemon stopped");
    }

    /// Run until `shutdown` resolves, letting an in-flight pass finish.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let handle = self.handle();
        let run = self.run();
        tokio::pin!(run);

        tokio::select! {
            () = &mut run => return,
            () = shutdown => {
                info!("shutdown requested");
                handle.stop();
            }
        }

        run.await;
    }

    /// Run a single full pass and record the outcome.
    pub async fn run_pass(&self) {
        self.status.write().await.total_runs += 1;

        let result = self.service.full_sync().await;

        let mut status = self.status.write().await;
        status.last_run_at = Some(Utc::now());
        match result {
            Ok(report) => {
                status.successful_runs += 1;
                status.last_report = Some(report);
                status.last_error = None;
            }
            Err(err) => {
                error!(error = %err, "sync pass failed");
                status.failed_runs += 1;
                status.last_error = Some(err.to_string());
            }
        }
    }

    /// Get current status.
    pub async fn status(&self) -> DaemonStatus {
        self.status.read().await.clone()
    }
}

//! Sync services.

pub mod label_mapping;
pub mod marker;
pub mod reconciler;
pub mod sync_daemon;
pub mod sync_service;

pub use reconciler::PlanOptions;
pub use sync_daemon::{DaemonHandle, DaemonStatus, SyncDaemon, SyncDaemonConfig, MAX_INTERVAL};
pub use sync_service::{ForwardReport, ReverseReport, SyncReport, SyncService};

//! gh-todoist-sync - two-way GitHub issues ↔ Todoist tasks synchronizer
//!
//! Mirrors the issues of one GitHub repository into one Todoist project and
//! pushes task completion back to the issues.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the gateway ports
//! - **Service Layer** (`services`): marker codec, reconciliation planning,
//!   the sync orchestrator and the interval daemon
//! - **Adapters** (`adapters`): GitHub and Todoist HTTP clients, in-memory gateways
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gh_todoist_sync::adapters::{GitHubClient, TodoistClient};
//! use gh_todoist_sync::services::{PlanOptions, SyncService};
//!
//! let config = gh_todoist_sync::ConfigLoader::load()?;
//! let service = SyncService::new(
//!     Arc::new(GitHubClient::new(&config.github)?),
//!     Arc::new(TodoistClient::new(&config.todoist)?),
//!     &config.todoist.project_name,
//!     PlanOptions::default(),
//! )
//! .await?;
//! let report = service.full_sync().await?;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Config, Issue, IssueState, Priority, Project, Task};
pub use domain::ports::{GatewayError, IssueGateway, TaskGateway};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{SyncDaemon, SyncReport, SyncService};

//! Domain errors for the synchronizer.
//!
//! These are the pass-fatal and startup-fatal conditions. Failures that
//! only affect one issue or task never surface here; they are logged and
//! counted in the pass reports instead.

use thiserror::Error;

use crate::domain::ports::GatewayError;

/// Domain-level errors that abort a pass or the orchestrator start-up.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The target project could not be found or created.
    #[error("Todoist project '{name}' could not be found or created: {source}")]
    ProjectUnavailable {
        /// Project name.
        name: String,
        /// Underlying gateway failure.
        #[source]
        source: GatewayError,
    },

    /// Listing issues failed.
    #[error("Failed to fetch GitHub issues: {0}")]
    IssueFetch(#[source] GatewayError),

    /// Listing tasks failed.
    #[error("Failed to fetch Todoist tasks: {0}")]
    TaskFetch(#[source] GatewayError),
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

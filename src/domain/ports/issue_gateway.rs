//! Port for the issue tracker side.

use async_trait::async_trait;

use crate::domain::models::{Issue, IssueState};
use crate::domain::ports::errors::GatewayError;

/// Port for the issue tracker holding the source of truth for issues.
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// Fetch every issue and pull request in the repository, in all states.
    ///
    /// Implementations must follow pagination until exhausted.
    async fn list_issues(&self) -> Result<Vec<Issue>, GatewayError>;

    /// Fetch a single issue by its repository-scoped number.
    async fn get_issue(&self, number: u64) -> Result<Issue, GatewayError>;

    /// Set the open/closed state of an issue.
    async fn update_issue_state(&self, number: u64, state: IssueState)
        -> Result<(), GatewayError>;
}

//! Infrastructure adapters for external systems.

pub mod github_issues;
pub mod memory;
pub mod rate_limiter;
pub mod todoist;

pub use github_issues::GitHubClient;
pub use todoist::TodoistClient;

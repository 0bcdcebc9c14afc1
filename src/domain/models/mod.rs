//! Domain models.

pub mod config;
pub mod issue;
pub mod task;

pub use config::{
    Config, GitHubConfig, LoggingConfig, SyncConfig, TodoistConfig, MAX_INTERVAL_MINUTES,
};
pub use issue::{Issue, IssueState};
pub use task::{NewTask, Priority, Project, Task, TaskUpdate};

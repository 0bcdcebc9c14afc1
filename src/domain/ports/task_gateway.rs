//! Port for the task manager side.

use async_trait::async_trait;

use crate::domain::models::{NewTask, Project, Task, TaskUpdate};
use crate::domain::ports::errors::GatewayError;

/// Port for the productivity service that holds tasks.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// List all projects visible to the token
    async fn list_projects(&self) -> Result<Vec<Project>, GatewayError>;

    /// Find a project by exact name
    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, GatewayError> {
        Ok(self
            .list_projects()
            .await?
            .into_iter()
            .find(|project| project.name == name))
    }

    /// Create a project with the given name
    async fn create_project(&self, name: &str) -> Result<Project, GatewayError>;

    /// List the tasks of a project
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, GatewayError>;

    /// Create a task
    async fn create_task(&self, task: &NewTask) -> Result<Task, GatewayError>;

    /// Apply a partial update to a task
    async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), GatewayError>;

    /// Mark a task completed
    async fn close_task(&self, task_id: &str) -> Result<(), GatewayError>;

    /// Mark a completed task active again
    async fn reopen_task(&self, task_id: &str) -> Result<(), GatewayError>;
}

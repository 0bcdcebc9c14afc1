//! Todoist REST v2 payloads.
//!
//! Responses carry many more fields than the synchronizer uses; unknown
//! fields are ignored on decode.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Priority, Project, Task};

/// A project returned by `GET /projects` or `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoistProject {
    /// Project id.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Browser URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// A task returned by the task endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoistTask {
    /// Task id.
    pub id: String,
    /// Owning project id.
    pub project_id: String,
    /// Task title.
    pub content: String,
    /// Description; carries the issue marker.
    #[serde(default)]
    pub description: String,
    /// Whether the task is checked off.
    #[serde(default)]
    pub is_completed: bool,
    /// Label names.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Priority, 1 (low) to 4 (urgent).
    #[serde(default)]
    pub priority: Priority,
}

/// Request body for `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Name of the new project.
    pub name: String,
}

impl From<TodoistProject> for Project {
    fn from(raw: TodoistProject) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            url: raw.url,
        }
    }
}

impl From<TodoistTask> for Task {
    fn from(raw: TodoistTask) -> Self {
        Self {
            id: raw.id,
            project_id: raw.project_id,
            content: raw.content,
            description: raw.description,
            is_completed: raw.is_completed,
            labels: raw.labels,
            priority: raw.priority,
        }
    }
}

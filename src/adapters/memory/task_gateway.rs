//! In-memory [`TaskGateway`](crate::domain::ports::TaskGateway).

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::models::{NewTask, Project, Task, TaskUpdate};
use crate::domain::ports::{GatewayError, TaskGateway};

/// A mutating call received by [`InMemoryTaskGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCall {
    /// `create_project(name)`.
    CreateProject(String),
    /// Task creation, identified by the task content.
    Create(String),
    /// `update_task(id, update)`.
    Update(String, TaskUpdate),
    /// `close_task(id)`.
    Close(String),
    /// `reopen_task(id)`.
    Reopen(String),
}

#[derive(Debug, Default)]
struct State {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    calls: Vec<TaskCall>,
    next_id: u64,
    fail_project_listing: bool,
    fail_project_creation: bool,
    fail_task_listing: bool,
    fail_create_for: HashSet<String>,
    fail_mutations_for: HashSet<String>,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn task_mut(&mut self, task_id: &str) -> Result<&mut Task, GatewayError> {
        if self.fail_mutations_for.contains(task_id) {
            return Err(server_error("task mutation rejected"));
        }
        self.tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| GatewayError::NotFound(format!("task {task_id}")))
    }
}

fn server_error(body: &str) -> GatewayError {
    GatewayError::ServerError {
        status: 500,
        body: body.to_string(),
    }
}

/// Task gateway holding projects and tasks in memory.
///
/// Listing returns tasks in insertion order, completed ones included.
#[derive(Debug, Default)]
pub struct InMemoryTaskGateway {
    state: Mutex<State>,
}

impl InMemoryTaskGateway {
    /// No projects and no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with one existing project.
    pub fn with_project(id: &str, name: &str) -> Self {
        Self {
            state: Mutex::new(State {
                projects: vec![Project {
                    id: id.to_string(),
                    name: name.to_string(),
                    url: None,
                }],
                ..State::default()
            }),
        }
    }

    /// Add tasks without recording a call.
    pub async fn insert_tasks(&self, tasks: Vec<Task>) {
        self.state.lock().await.tasks.extend(tasks);
    }

    /// Current tasks.
    pub async fn tasks(&self) -> Vec<Task> {
        self.state.lock().await.tasks.clone()
    }

    /// Current projects.
    pub async fn projects(&self) -> Vec<Project> {
        self.state.lock().await.projects.clone()
    }

    /// Mutating calls recorded so far.
    pub async fn calls(&self) -> Vec<TaskCall> {
        self.state.lock().await.calls.clone()
    }

    /// Make project listing fail.
    pub async fn fail_project_listing(&self) {
        self.state.lock().await.fail_project_listing = true;
    }

    /// Make project creation fail.
    pub async fn fail_project_creation(&self) {
        self.state.lock().await.fail_project_creation = true;
    }

    /// Make task listing fail.
    pub async fn fail_task_listing(&self) {
        self.state.lock().await.fail_task_listing = true;
    }

    /// Reject creation of tasks with this content.
    pub async fn fail_create_for_content(&self, content: &str) {
        self.state.lock().await.fail_create_for.insert(content.to_string());
    }

    /// Reject update, close and reopen of this task.
    pub async fn fail_mutations_for(&self, task_id: &str) {
        self.state
            .lock()
            .await
            .fail_mutations_for
            .insert(task_id.to_string());
    }

    /// Flip completion directly, as a user would in the Todoist app.
    pub async fn set_completed(&self, task_id: &str, completed: bool) {
        let mut state = self.state.lock().await;
        if let Some(task) = state.tasks.iter_mut().find(|task| task.id == task_id) {
            task.is_completed = completed;
        }
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, GatewayError> {
        let state = self.state.lock().await;
        if state.fail_project_listing {
            return Err(server_error("project listing unavailable"));
        }
        Ok(state.projects.clone())
    }

    async fn create_project(&self, name: &str) -> Result<Project, GatewayError> {
        let mut state = self.state.lock().await;
        if state.fail_project_creation {
            return Err(server_error("project creation rejected"));
        }
        let project = Project {
            id: state.next_id("project"),
            name: name.to_string(),
            url: None,
        };
        state.projects.push(project.clone());
        state.calls.push(TaskCall::CreateProject(name.to_string()));
        Ok(project)
    }

    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, GatewayError> {
        let state = self.state.lock().await;
        if state.fail_task_listing {
            return Err(server_error("task listing unavailable"));
        }
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, GatewayError> {
        let mut state = self.state.lock().await;
        if state.fail_create_for.contains(&task.content) {
            return Err(server_error("task creation rejected"));
        }
        let created = Task {
            id: state.next_id("task"),
            project_id: task.project_id.clone(),
            content: task.content.clone(),
            description: task.description.clone(),
            is_completed: false,
            labels: task.labels.clone(),
            priority: task.priority,
        };
        state.tasks.push(created.clone());
        state.calls.push(TaskCall::Create(task.content.clone()));
        Ok(created)
    }

    async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        update.apply_to(state.task_mut(task_id)?);
        state
            .calls
            .push(TaskCall::Update(task_id.to_string(), update.clone()));
        Ok(())
    }

    async fn close_task(&self, task_id: &str) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.task_mut(task_id)?.is_completed = true;
        state.calls.push(TaskCall::Close(task_id.to_string()));
        Ok(())
    }

    async fn reopen_task(&self, task_id: &str) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.task_mut(task_id)?.is_completed = false;
        state.calls.push(TaskCall::Reopen(task_id.to_string()));
        Ok(())
    }
}

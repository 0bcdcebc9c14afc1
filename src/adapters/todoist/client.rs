//! Todoist HTTP client with rate limiting.
//!
//! Wraps the Todoist REST API v2. Every request is authorized with a
//! bearer token. Close and reopen answer `204 No Content`, so their
//! bodies are never decoded.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use tokio::sync::Mutex;
use tracing::debug;

use crate::adapters::rate_limiter::RateLimiter;
use crate::domain::models::{NewTask, Project, Task, TaskUpdate, TodoistConfig};
use crate::domain::ports::{GatewayError, TaskGateway};

use super::models::{CreateProjectRequest, TodoistProject, TodoistTask};

/// HTTP client for the Todoist REST API v2.
#[derive(Clone)]
pub struct TodoistClient {
    http: Client,
    token: String,
    base_url: String,
    /// Shared across clones (450 req per 15 minutes).
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl fmt::Debug for TodoistClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoistClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl TodoistClient {
    /// Build a client from configuration.
    pub fn new(config: &TodoistConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            token: config.token.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::todoist())),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        self.http
            .request(method, self.url(path))
            .bearer_auth(&self.token)
    }

    /// Send a request and turn non-success statuses into errors.
    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, GatewayError> {
        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(GatewayError::from_status(status.as_u16(), body, resource))
    }
}

#[async_trait]
impl TaskGateway for TodoistClient {
    async fn list_projects(&self) -> Result<Vec<Project>, GatewayError> {
        let request = self.rate_limited_request(Method::GET, "/projects").await;
        let projects: Vec<TodoistProject> = self.send(request, "projects").await?.json().await?;
        debug!(count = projects.len(), "fetched Todoist projects");
        Ok(projects.into_iter().map(Project::from).collect())
    }

    async fn create_project(&self, name: &str) -> Result<Project, GatewayError> {
        let body = CreateProjectRequest {
            name: name.to_string(),
        };
        let request = self
            .rate_limited_request(Method::POST, "/projects")
            .await
            .json(&body);
        let project: TodoistProject = self.send(request, "projects").await?.json().await?;
        Ok(project.into())
    }

    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, GatewayError> {
        let request = self
            .rate_limited_request(Method::GET, "/tasks")
            .await
            .query(&[("project_id", project_id)]);
        let tasks: Vec<TodoistTask> = self
            .send(request, &format!("tasks of project {project_id}"))
            .await?
            .json()
            .await?;
        debug!(project_id, count = tasks.len(), "fetched Todoist tasks");
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, GatewayError> {
        let request = self
            .rate_limited_request(Method::POST, "/tasks")
            .await
            .json(task);
        let created: TodoistTask = self.send(request, "tasks").await?.json().await?;
        Ok(created.into())
    }

    async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), GatewayError> {
        let request = self
            .rate_limited_request(Method::POST, &format!("/tasks/{task_id}"))
            .await
            .json(update);
        self.send(request, &format!("task {task_id}")).await?;
        Ok(())
    }

    async fn close_task(&self, task_id: &str) -> Result<(), GatewayError> {
        let request = self
            .rate_limited_request(Method::POST, &format!("/tasks/{task_id}/close"))
            .await;
        self.send(request, &format!("task {task_id}")).await?;
        Ok(())
    }

    async fn reopen_task(&self, task_id: &str) -> Result<(), GatewayError> {
        let request = self
            .rate_limited_request(Method::POST, &format!("/tasks/{task_id}/reopen"))
            .await;
        self.send(request, &format!("task {task_id}")).await?;
        Ok(())
    }
}

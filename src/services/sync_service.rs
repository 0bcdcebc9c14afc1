//! Sync orchestrator.
//!
//! Owns the target Todoist project (resolved once at construction) and runs
//! forward, reverse and full reconciliation passes against the gateways.
//! Fetching the full issue or task set is pass-fatal; every per-item call
//! is logged and skipped on failure so the rest of the pass still runs.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{IssueState, Project};
use crate::domain::ports::{IssueGateway, TaskGateway};
use crate::services::marker::parse_marker;
use crate::services::reconciler::{plan_forward, plan_reverse, ForwardAction, PlanOptions};

/// Outcome of a GitHub → Todoist pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForwardReport {
    /// Items in the listing, pull requests included.
    pub issues_seen: usize,
    /// Pull requests ignored.
    pub pull_requests_skipped: usize,
    /// Tasks created for previously unlinked issues.
    pub created: usize,
    /// Tasks updated.
    pub updated: usize,
    /// Tasks closed.
    pub closed: usize,
    /// Tasks reopened.
    pub reopened: usize,
    /// Linked tasks left as they were.
    pub unchanged: usize,
    /// Calls that failed.
    pub failed: usize,
}

/// Outcome of a Todoist → GitHub pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReverseReport {
    /// Tasks in the project.
    pub tasks_seen: usize,
    /// Tasks without a marker.
    pub unlinked: usize,
    /// Issues closed.
    pub closed: usize,
    /// Issues reopened.
    pub reopened: usize,
    /// Linked tasks left as they were.
    pub unchanged: usize,
    /// Calls that failed.
    pub failed: usize,
}

/// Outcome of a full pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// GitHub to Todoist half.
    pub forward: ForwardReport,
    /// Todoist to GitHub half.
    pub reverse: ReverseReport,
}

/// Orchestrates reconciliation between one repository and one project.
pub struct SyncService<I: IssueGateway, T: TaskGateway> {
    issues: Arc<I>,
    tasks: Arc<T>,
    project: Project,
    options: PlanOptions,
}

impl<I: IssueGateway, T: TaskGateway> SyncService<I, T> {
    /// Resolve the target project and build the service.
    ///
    /// The project is looked up by exact name and created when missing or
    /// when the lookup itself fails. Only a failed creation is fatal.
    pub async fn new(
        issues: Arc<I>,
        tasks: Arc<T>,
        project_name: &str,
        options: PlanOptions,
    ) -> DomainResult<Self> {
        let project = Self::ensure_project(tasks.as_ref(), project_name).await?;
        Ok(Self {
            issues,
            tasks,
            project,
            options,
        })
    }

    async fn ensure_project(tasks: &T, name: &str) -> DomainResult<Project> {
        match tasks.find_project_by_name(name).await {
            Ok(Some(project)) => {
                info!(project = %project.name, project_id = %project.id, "using existing Todoist project");
                return Ok(project);
            }
            Ok(None) => debug!(project = %name, "Todoist project not found"),
            Err(err) => warn!(project = %name, error = %err, "Todoist project lookup failed, trying to create it"),
        }

        info!(project = %name, "creating Todoist project");
        let project = tasks
            .create_project(name)
            .await
            .map_err(|source| DomainError::ProjectUnavailable {
                name: name.to_string(),
                source,
            })?;
        info!(project = %project.name, project_id = %project.id, "created Todoist project");
        Ok(project)
    }

    /// The project resolved at construction.
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// GitHub → Todoist: create missing tasks and push issue changes.
    #[instrument(skip(self), fields(project_id = %self.project.id))]
    pub async fn sync_from_github(&self) -> DomainResult<ForwardReport> {
        info!("starting GitHub → Todoist sync");

        let issues = self
            .issues
            .list_issues()
            .await
            .map_err(DomainError::IssueFetch)?;
        info!(count = issues.len(), "fetched GitHub issues");

        let tasks = self
            .tasks
            .list_tasks(&self.project.id)
            .await
            .map_err(DomainError::TaskFetch)?;
        debug!(count = tasks.len(), "fetched Todoist tasks");

        let plan = plan_forward(&issues, &tasks, &self.project.id, self.options);
        for duplicate in &plan.duplicates {
            warn!(
                issue = duplicate.issue_number,
                kept_task = %duplicate.kept_task_id,
                ignored_task = %duplicate.ignored_task_id,
                "several tasks link the same issue, keeping the first"
            );
        }

        let mut report = ForwardReport {
            issues_seen: issues.len(),
            pull_requests_skipped: plan.pull_requests_skipped,
            unchanged: plan.unchanged,
            ..ForwardReport::default()
        };

        for action in &plan.actions {
            self.apply_forward(action, &mut report).await;
        }

        info!(
            created = report.created,
            updated = report.updated,
            closed = report.closed,
            reopened = report.reopened,
            failed = report.failed,
            "GitHub → Todoist sync finished"
        );
        Ok(report)
    }

    async fn apply_forward(&self, action: &ForwardAction, report: &mut ForwardReport) {
        let issue = action.issue_number();
        match action {
            ForwardAction::Create { task, .. } => match self.tasks.create_task(task).await {
                Ok(created) => {
                    report.created += 1;
                    info!(issue, task_id = %created.id, title = %task.content, "created task for issue");
                }
                Err(err) => {
                    report.failed += 1;
                    error!(issue, error = %err, "failed to create task for issue");
                }
            },
            ForwardAction::SetCompletion {
                task_id, completed, ..
            } => {
                let result = if *completed {
                    self.tasks.close_task(task_id).await
                } else {
                    self.tasks.reopen_task(task_id).await
                };
                match result {
                    Ok(()) if *completed => {
                        report.closed += 1;
                        info!(issue, task_id = %task_id, "closed task for closed issue");
                    }
                    Ok(()) => {
                        report.reopened += 1;
                        info!(issue, task_id = %task_id, "reopened task for open issue");
                    }
                    Err(err) => {
                        report.failed += 1;
                        error!(issue, task_id = %task_id, error = %err, "failed to change task completion");
                    }
                }
            }
            ForwardAction::Update {
                task_id, update, ..
            } => match self.tasks.update_task(task_id, update).await {
                Ok(()) => {
                    report.updated += 1;
                    info!(issue, task_id = %task_id, "updated task for issue");
                }
                Err(err) => {
                    report.failed += 1;
                    error!(issue, task_id = %task_id, error = %err, "failed to update task");
                }
            },
        }
    }

    /// Todoist → GitHub: mirror task completion onto issue state.
    ///
    /// Each linked task costs one issue lookup.
    #[instrument(skip(self), fields(project_id = %self.project.id))]
    pub async fn sync_to_github(&self) -> DomainResult<ReverseReport> {
        info!("starting Todoist → GitHub sync");

        let tasks = self
            .tasks
            .list_tasks(&self.project.id)
            .await
            .map_err(DomainError::TaskFetch)?;

        let mut report = ReverseReport {
            tasks_seen: tasks.len(),
            ..ReverseReport::default()
        };

        for task in &tasks {
            let Some(number) = parse_marker(&task.description) else {
                report.unlinked += 1;
                continue;
            };

            let issue = match self.issues.get_issue(number).await {
                Ok(issue) => issue,
                Err(err) => {
                    report.failed += 1;
                    error!(issue = number, task_id = %task.id, error = %err, "failed to fetch linked issue");
                    continue;
                }
            };

            let Some(state) = plan_reverse(task, &issue) else {
                report.unchanged += 1;
                continue;
            };

            match self.issues.update_issue_state(number, state).await {
                Ok(()) => match state {
                    IssueState::Closed => {
                        report.closed += 1;
                        info!(issue = number, task_id = %task.id, "closed issue completed in Todoist");
                    }
                    IssueState::Open => {
                        report.reopened += 1;
                        info!(issue = number, task_id = %task.id, "reopened issue reactivated in Todoist");
                    }
                },
                Err(err) => {
                    report.failed += 1;
                    error!(issue = number, state = %state, error = %err, "failed to update issue state");
                }
            }
        }

        info!(
            closed = report.closed,
            reopened = report.reopened,
            failed = report.failed,
            "Todoist → GitHub sync finished"
        );
        Ok(report)
    }

    /// Forward pass, then reverse pass against freshly fetched tasks.
    pub async fn full_sync(&self) -> DomainResult<SyncReport> {
        info!("starting full sync");
        let forward = self.sync_from_github().await?;
        let reverse = self.sync_to_github().await?;
        info!("full sync finished");
        Ok(SyncReport { forward, reverse })
    }
}

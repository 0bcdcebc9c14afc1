//! Reconciliation planning between GitHub issues and Todoist tasks.
//!
//! Everything in this module is pure: it takes the fetched issue and task
//! sets and decides which remote calls are needed. [`SyncService`] applies
//! the resulting actions through the gateways.
//!
//! Rules:
//! - Pull requests are never synced.
//! - An issue without a linked task gets a new task.
//! - A linked task whose completion disagrees with the issue state gets a
//!   close/reopen call and nothing else on that pass.
//! - Otherwise content and priority differences (and labels, when enabled)
//!   are sent as one combined update.
//!
//! [`SyncService`]: crate::services::SyncService

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::models::{Issue, IssueState, NewTask, Task, TaskUpdate};
use crate::services::label_mapping::{normalize_labels, priority_from_labels};
use crate::services::marker::{format_marker, parse_marker};

/// Knobs for the forward plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Include label differences in task updates.
    pub update_labels: bool,
}

/// Two tasks claiming the same issue number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateLink {
    /// Issue both tasks point at.
    pub issue_number: u64,
    /// Task that is kept in sync.
    pub kept_task_id: String,
    /// Task that is left alone.
    pub ignored_task_id: String,
}

/// Issue number → linked task, built by one scan over the fetched tasks.
///
/// When several tasks carry the same marker the first one in scan order
/// is kept and the others are listed in [`duplicates`](Self::duplicates).
#[derive(Debug, Default)]
pub struct TaskIndex<'a> {
    by_issue: HashMap<u64, &'a Task>,
    /// Extra tasks pointing at an already indexed issue.
    pub duplicates: Vec<DuplicateLink>,
}

impl<'a> TaskIndex<'a> {
    /// Index tasks by the issue number in their marker.
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut index = Self::default();
        for task in tasks {
            let Some(number) = parse_marker(&task.description) else {
                continue;
            };
            match index.by_issue.get(&number) {
                Some(kept) => index.duplicates.push(DuplicateLink {
                    issue_number: number,
                    kept_task_id: kept.id.clone(),
                    ignored_task_id: task.id.clone(),
                }),
                None => {
                    index.by_issue.insert(number, task);
                }
            }
        }
        index
    }

    /// Task linked to this issue.
    pub fn get(&self, issue_number: u64) -> Option<&'a Task> {
        self.by_issue.get(&issue_number).copied()
    }

    /// Number of linked issues.
    pub fn len(&self) -> usize {
        self.by_issue.len()
    }

    /// True when no task carries a marker.
    pub fn is_empty(&self) -> bool {
        self.by_issue.is_empty()
    }
}

/// One remote mutation decided by the forward plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardAction {
    /// No linked task exists yet.
    Create {
        /// Issue being synced.
        issue_number: u64,
        /// Task to create.
        task: NewTask,
    },
    /// Completion disagrees with the issue state; takes precedence over
    /// any field update.
    SetCompletion {
        /// Issue being synced.
        issue_number: u64,
        /// Task to close or reopen.
        task_id: String,
        /// Target completion.
        completed: bool,
    },
    /// Field differences, sent as one call.
    Update {
        /// Issue being synced.
        issue_number: u64,
        /// Task to update.
        task_id: String,
        /// Fields to change.
        update: TaskUpdate,
    },
}

impl ForwardAction {
    /// Issue the action is for.
    pub const fn issue_number(&self) -> u64 {
        match self {
            Self::Create { issue_number, .. }
            | Self::SetCompletion { issue_number, .. }
            | Self::Update { issue_number, .. } => *issue_number,
        }
    }
}

/// Result of planning a forward pass.
#[derive(Debug, Default)]
pub struct ForwardPlan {
    /// Calls to make, in issue order.
    pub actions: Vec<ForwardAction>,
    /// Pull requests in the listing.
    pub pull_requests_skipped: usize,
    /// Linked issues that need no call.
    pub unchanged: usize,
    /// Duplicate links found while indexing.
    pub duplicates: Vec<DuplicateLink>,
}

/// Build the create payload for an issue.
pub fn new_task_for_issue(issue: &Issue, project_id: &str) -> NewTask {
    NewTask {
        content: issue.title.clone(),
        description: format_marker(issue.number, &issue.html_url),
        project_id: project_id.to_string(),
        labels: normalize_labels(&issue.labels),
        priority: priority_from_labels(&issue.labels),
        due_string: None,
        due_date: None,
    }
}

/// Decide what, if anything, a linked task needs to match its issue.
pub fn diff_linked_task(issue: &Issue, task: &Task, options: PlanOptions) -> Option<ForwardAction> {
    let should_be_completed = issue.is_closed();
    if task.is_completed != should_be_completed {
        return Some(ForwardAction::SetCompletion {
            issue_number: issue.number,
            task_id: task.id.clone(),
            completed: should_be_completed,
        });
    }

    let mut update = TaskUpdate::default();
    if task.content != issue.title {
        update.content = Some(issue.title.clone());
    }
    let priority = priority_from_labels(&issue.labels);
    if task.priority != priority {
        update.priority = Some(priority);
    }
    if options.update_labels {
        let labels = normalize_labels(&issue.labels);
        if task.labels != labels {
            update.labels = Some(labels);
        }
    }

    (!update.is_empty()).then(|| ForwardAction::Update {
        issue_number: issue.number,
        task_id: task.id.clone(),
        update,
    })
}

/// Plan the GitHub → Todoist direction.
pub fn plan_forward(
    issues: &[Issue],
    tasks: &[Task],
    project_id: &str,
    options: PlanOptions,
) -> ForwardPlan {
    let index = TaskIndex::build(tasks);
    let mut plan = ForwardPlan::default();

    for issue in issues {
        if issue.is_pull_request {
            plan.pull_requests_skipped += 1;
            continue;
        }

        match index.get(issue.number) {
            None => plan.actions.push(ForwardAction::Create {
                issue_number: issue.number,
                task: new_task_for_issue(issue, project_id),
            }),
            Some(task) => match diff_linked_task(issue, task, options) {
                Some(action) => plan.actions.push(action),
                None => plan.unchanged += 1,
            },
        }
    }

    plan.duplicates = index.duplicates;
    plan
}

/// Decide the issue state change implied by a linked task, if any.
pub const fn plan_reverse(task: &Task, issue: &Issue) -> Option<IssueState> {
    match (task.is_completed, issue.state) {
        (true, IssueState::Open) => Some(IssueState::Closed),
        (false, IssueState::Closed) => Some(IssueState::Open),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Priority;

    fn linked_task(id: &str, issue: &Issue) -> Task {
        Task {
            id: id.to_string(),
            project_id: "p1".to_string(),
            content: issue.title.clone(),
            description: format_marker(issue.number, &issue.html_url),
            is_completed: issue.is_closed(),
            labels: normalize_labels(&issue.labels),
            priority: priority_from_labels(&issue.labels),
        }
    }

    #[test]
    fn test_unlinked_issue_creates_task() {
        let issue = Issue::new(5, "Crash on start").with_labels(["High", "good first-issue"]);
        let plan = plan_forward(&[issue.clone()], &[], "p1", PlanOptions::default());

        assert_eq!(plan.actions.len(), 1);
        match &plan.actions[0] {
            ForwardAction::Create { issue_number, task } => {
                assert_eq!(*issue_number, 5);
                assert_eq!(task.content, "Crash on start");
                assert_eq!(task.project_id, "p1");
                assert_eq!(task.priority, Priority::High);
                assert_eq!(task.labels, vec!["high".to_string(), "good_first_issue".to_string()]);
                assert_eq!(parse_marker(&task.description), Some(5));
                assert_eq!(task.description, format_marker(5, &issue.html_url));
            }
            other => panic!("Expected Create, got {other:?}"),
        }
    }

    #[test]
    fn test_pull_requests_are_skipped() {
        let pr = Issue::new(9, "Add feature").as_pull_request();
        let plan = plan_forward(&[pr], &[], "p1", PlanOptions::default());
        assert!(plan.actions.is_empty());
        assert_eq!(plan.pull_requests_skipped, 1);
    }

    #[test]
    fn test_in_sync_issue_produces_no_action() {
        let issue = Issue::new(1, "Docs").with_labels(["medium"]);
        let tasks = vec![linked_task("t1", &issue)];
        let plan = plan_forward(&[issue], &tasks, "p1", PlanOptions::default());
        assert!(plan.actions.is_empty());
        assert_eq!(plan.unchanged, 1);
    }

    #[test]
    fn test_title_and_priority_diff_combined_into_one_update() {
        let issue = Issue::new(2, "New title").with_labels(["urgent"]);
        let mut task = linked_task("t2", &issue);
        task.content = "Old title".to_string();
        task.priority = Priority::Low;

        let plan = plan_forward(&[issue], &[task], "p1", PlanOptions::default());
        assert_eq!(
            plan.actions,
            vec![ForwardAction::Update {
                issue_number: 2,
                task_id: "t2".to_string(),
                update: TaskUpdate {
                    content: Some("New title".to_string()),
                    priority: Some(Priority::Urgent),
                    labels: None,
                },
            }]
        );
    }

    #[test]
    fn test_closed_issue_closes_open_task_and_skips_field_diff() {
        let issue = Issue::new(3, "Renamed")
            .with_state(IssueState::Closed)
            .with_labels(["high"]);
        let mut task = linked_task("t3", &issue);
        task.is_completed = false;
        task.content = "Stale".to_string();
        task.priority = Priority::Low;

        let plan = plan_forward(&[issue], &[task], "p1", PlanOptions::default());
        assert_eq!(
            plan.actions,
            vec![ForwardAction::SetCompletion {
                issue_number: 3,
                task_id: "t3".to_string(),
                completed: true,
            }]
        );
    }

    #[test]
    fn test_open_issue_reopens_completed_task() {
        let issue = Issue::new(4, "Regression");
        let mut task = linked_task("t4", &issue);
        task.is_completed = true;

        let action = diff_linked_task(&issue, &task, PlanOptions::default());
        assert_eq!(
            action,
            Some(ForwardAction::SetCompletion {
                issue_number: 4,
                task_id: "t4".to_string(),
                completed: false,
            })
        );
    }

    #[test]
    fn test_labels_only_diffed_when_enabled() {
        let issue = Issue::new(6, "Labels").with_labels(["bug", "UI"]);
        let mut task = linked_task("t6", &issue);
        task.labels = vec!["bug".to_string()];

        assert_eq!(diff_linked_task(&issue, &task, PlanOptions::default()), None);

        let action = diff_linked_task(&issue, &task, PlanOptions { update_labels: true });
        match action {
            Some(ForwardAction::Update { update, .. }) => {
                assert_eq!(update.labels, Some(vec!["bug".to_string(), "ui".to_string()]));
                assert_eq!(update.content, None);
                assert_eq!(update.priority, None);
            }
            other => panic!("Expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_index_keeps_first_duplicate_in_scan_order() {
        let issue = Issue::new(8, "Dup");
        let first = linked_task("first", &issue);
        let second = linked_task("second", &issue);
        let tasks = vec![first, second];

        let index = TaskIndex::build(&tasks);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(8).map(|t| t.id.as_str()), Some("first"));
        assert_eq!(
            index.duplicates,
            vec![DuplicateLink {
                issue_number: 8,
                kept_task_id: "first".to_string(),
                ignored_task_id: "second".to_string(),
            }]
        );
    }

    #[test]
    fn test_index_ignores_unlinked_tasks() {
        let tasks = vec![Task {
            id: "manual".to_string(),
            project_id: "p1".to_string(),
            content: "Buy milk".to_string(),
            description: "no marker here".to_string(),
            is_completed: false,
            labels: vec![],
            priority: Priority::Low,
        }];
        let index = TaskIndex::build(&tasks);
        assert!(index.is_empty());
        assert!(index.duplicates.is_empty());
    }

    #[test]
    fn test_plan_reverse_rules() {
        let open = Issue::new(7, "Open");
        let closed = Issue::new(9, "Closed").with_state(IssueState::Closed);

        let mut completed = linked_task("a", &open);
        completed.is_completed = true;
        let mut active = linked_task("b", &closed);
        active.is_completed = false;

        assert_eq!(plan_reverse(&completed, &open), Some(IssueState::Closed));
        assert_eq!(plan_reverse(&active, &closed), Some(IssueState::Open));
        assert_eq!(plan_reverse(&completed, &closed), None);
        assert_eq!(plan_reverse(&active, &open), None);
    }
}

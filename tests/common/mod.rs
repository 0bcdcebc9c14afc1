//! Common test utilities for integration tests
//!
//! Fixtures shared by the HTTP client and sync tests.

#![allow(dead_code)]

use gh_todoist_sync::domain::models::{GitHubConfig, Issue, Priority, Task, TodoistConfig};
use gh_todoist_sync::services::marker::format_marker;
use serde_json::{json, Value};

pub const GITHUB_TOKEN: &str = "ghp_test_token";
pub const TODOIST_TOKEN: &str = "todoist_test_token";

/// GitHub config pointing at a mock server.
pub fn github_config(base_url: &str) -> GitHubConfig {
    GitHubConfig {
        token: GITHUB_TOKEN.to_string(),
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        api_base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}

/// Todoist config pointing at a mock server.
pub fn todoist_config(base_url: &str) -> TodoistConfig {
    TodoistConfig {
        token: TODOIST_TOKEN.to_string(),
        api_base_url: base_url.to_string(),
        timeout_secs: 5,
        ..TodoistConfig::default()
    }
}

/// A GitHub issue as returned by the REST API.
pub fn issue_json(number: u64, state: &str, labels: &[&str]) -> Value {
    json!({
        "id": 1000 + number,
        "number": number,
        "title": format!("Issue {number}"),
        "body": "body text",
        "state": state,
        "labels": labels.iter().map(|name| json!({ "name": name, "color": "ededed" })).collect::<Vec<_>>(),
        "assignee": null,
        "pull_request": null,
        "created_at": "2024-01-14T08:00:00Z",
        "updated_at": "2024-01-15T10:30:00Z",
        "html_url": format!("https://github.com/octo/widgets/issues/{number}"),
    })
}

/// A pull request as returned by the issues endpoint.
pub fn pull_request_json(number: u64) -> Value {
    let mut value = issue_json(number, "open", &[]);
    value["pull_request"] = json!({ "url": format!("https://api.github.com/repos/octo/widgets/pulls/{number}") });
    value["html_url"] = json!(format!("https://github.com/octo/widgets/pull/{number}"));
    value
}

/// A Todoist task as returned by the REST API.
pub fn task_json(id: &str, content: &str, description: &str, completed: bool, priority: u8) -> Value {
    json!({
        "id": id,
        "project_id": "p1",
        "section_id": null,
        "content": content,
        "description": description,
        "is_completed": completed,
        "labels": [],
        "priority": priority,
        "comment_count": 0,
        "url": format!("https://todoist.com/showTask?id={id}"),
    })
}

/// A task linked to `issue` in project `p1`.
pub fn linked_task(id: &str, issue: &Issue, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        project_id: "p1".to_string(),
        content: issue.title.clone(),
        description: format_marker(issue.number, &issue.html_url),
        is_completed: completed,
        labels: vec![],
        priority: Priority::Low,
    }
}

//! GitHub Issues API response and request models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads and are
//! converted into the domain [`Issue`] at the adapter boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{Issue, IssueState};

/// An issue returned by the GitHub API.
///
/// Issues and pull requests share the same endpoint. Pull requests carry
/// a non-null `pull_request` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    /// Global issue id.
    pub id: u64,
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    /// "open" or "closed".
    pub state: String,
    /// Attached labels.
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
    /// First assignee, if any.
    #[serde(default)]
    pub assignee: Option<GitHubUser>,
    /// Set when the item is a pull request.
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Browser URL of the issue.
    pub html_url: String,
}

/// A label applied to a GitHub issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLabel {
    /// Label name as shown on GitHub.
    pub name: String,
}

/// The assignee of an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    /// GitHub username.
    pub login: String,
}

/// Reference object present on pull requests (absent on plain issues).
///
/// Only its presence matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequestRef {}

/// Request body for patching an issue's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssueUpdateRequest {
    /// New state: "open" or "closed".
    pub state: String,
}

impl From<GitHubIssue> for Issue {
    fn from(raw: GitHubIssue) -> Self {
        Self {
            id: raw.id,
            number: raw.number,
            title: raw.title,
            body: raw.body.unwrap_or_default(),
            state: IssueState::from_api(&raw.state),
            labels: raw.labels.into_iter().map(|label| label.name).collect(),
            assignee: raw.assignee.map(|user| user.login),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            html_url: raw.html_url,
            is_pull_request: raw.pull_request.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_issue_deserialization() {
        let json = r#"{
            "id": 1,
            "number": 42,
            "title": "Fix login bug",
            "body": "Users cannot log in after the last deploy.",
            "state": "open",
            "labels": [
                { "name": "bug", "color": "d73a4a" },
                { "name": "High", "color": "e4e669" }
            ],
            "assignee": { "login": "octocat" },
            "pull_request": null,
            "updated_at": "2024-01-15T10:30:00Z",
            "html_url": "https://github.com/org/repo/issues/42",
            "created_at": "2024-01-14T08:00:00Z"
        }"#;
        let raw: GitHubIssue = serde_json::from_str(json).unwrap();
        let issue = Issue::from(raw);

        assert_eq!(issue.number, 42);
        assert_eq!(issue.state, IssueState::Open);
        assert_eq!(issue.labels, vec!["bug".to_string(), "High".to_string()]);
        assert_eq!(issue.assignee.as_deref(), Some("octocat"));
        assert!(!issue.is_pull_request);
    }

    #[test]
    fn test_minimal_pull_request_deserialization() {
        let json = r#"{
            "id": 2,
            "number": 7,
            "title": "Add feature",
            "body": null,
            "state": "closed",
            "pull_request": { "url": "https://api.github.com/repos/org/repo/pulls/7" },
            "updated_at": "2024-01-15T10:30:00Z",
            "html_url": "https://github.com/org/repo/pull/7",
            "created_at": "2024-01-14T08:00:00Z"
        }"#;
        let issue = Issue::from(serde_json::from_str::<GitHubIssue>(json).unwrap());

        assert!(issue.is_pull_request);
        assert!(issue.is_closed());
        assert!(issue.body.is_empty());
        assert!(issue.labels.is_empty());
        assert!(issue.assignee.is_none());
    }

    #[test]
    fn test_update_request_serialization() {
        let body = GitHubIssueUpdateRequest {
            state: IssueState::Closed.as_str().to_string(),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"state":"closed"}"#);
    }
}

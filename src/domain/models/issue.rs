//! GitHub issue as seen by the synchronizer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open/closed state of a GitHub issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Open.
    Open,
    /// Closed.
    Closed,
}

impl IssueState {
    /// Wire value used by the GitHub REST API.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Parse the GitHub wire value. Anything other than `closed` is open.
    pub fn from_api(state: &str) -> Self {
        if state.eq_ignore_ascii_case("closed") {
            Self::Closed
        } else {
            Self::Open
        }
    }

    /// True for [`IssueState::Closed`].
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue (or pull request) fetched from the tracked repository.
///
/// Identity is the repository-scoped `number`; `id` is GitHub's opaque
/// global identifier and is kept only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Global issue id.
    pub id: u64,
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body; empty when GitHub sends none.
    #[serde(default)]
    pub body: String,
    /// Open or closed.
    pub state: IssueState,
    /// Label names in the order GitHub returns them.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Login of the first assignee.
    pub assignee: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Browser URL of the issue.
    pub html_url: String,
    /// Pull requests share the issues endpoint and are never synced.
    #[serde(default)]
    pub is_pull_request: bool,
}

impl Issue {
    /// Build an open issue with the given number and title.
    ///
    /// The URL follows the `https://github.com/<owner>/<repo>/issues/<n>`
    /// shape with a placeholder repository.
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: number,
            number,
            title: title.into(),
            body: String::new(),
            state: IssueState::Open,
            labels: Vec::new(),
            assignee: None,
            created_at: now,
            updated_at: now,
            html_url: format!("https://github.com/owner/repo/issues/{number}"),
            is_pull_request: false,
        }
    }

    /// Set the state.
    pub fn with_state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }

    /// Set the label names.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the browser URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = url.into();
        self
    }

    /// Mark as a pull request.
    pub fn as_pull_request(mut self) -> Self {
        self.is_pull_request = true;
        self
    }

    /// Whether the issue is closed.
    pub const fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}

//! In-memory [`IssueGateway`](crate::domain::ports::IssueGateway).

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::models::{Issue, IssueState};
use crate::domain::ports::{GatewayError, IssueGateway};

/// A mutating call received by [`InMemoryIssueGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueCall {
    /// `update_issue_state(number, state)`.
    UpdateState(u64, IssueState),
}

#[derive(Debug, Default)]
struct State {
    issues: Vec<Issue>,
    calls: Vec<IssueCall>,
    page_size: Option<usize>,
    pages_served: usize,
    fail_listing: bool,
    fail_updates: HashSet<u64>,
}

/// Issue gateway backed by a vector of issues.
#[derive(Debug, Default)]
pub struct InMemoryIssueGateway {
    state: Mutex<State>,
}

impl InMemoryIssueGateway {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding these issues.
    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            state: Mutex::new(State {
                issues,
                ..State::default()
            }),
        }
    }

    /// Serve listings in pages of `page_size`, as the REST API does.
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        let mut state = self.state.into_inner();
        state.page_size = Some(page_size.max(1));
        Self {
            state: Mutex::new(state),
        }
    }

    /// Make every listing fail.
    pub async fn fail_listing(&self) {
        self.state.lock().await.fail_listing = true;
    }

    /// Reject state updates of this issue.
    pub async fn fail_update_for(&self, number: u64) {
        self.state.lock().await.fail_updates.insert(number);
    }

    /// Mutating calls recorded so far.
    pub async fn calls(&self) -> Vec<IssueCall> {
        self.state.lock().await.calls.clone()
    }

    /// Current issue set.
    pub async fn issues(&self) -> Vec<Issue> {
        self.state.lock().await.issues.clone()
    }

    /// Pages served by the last listing.
    pub async fn pages_served(&self) -> usize {
        self.state.lock().await.pages_served
    }
}

fn server_error(body: &str) -> GatewayError {
    GatewayError::ServerError {
        status: 500,
        body: body.to_string(),
    }
}

#[async_trait]
impl IssueGateway for InMemoryIssueGateway {
    async fn list_issues(&self) -> Result<Vec<Issue>, GatewayError> {
        let mut state = self.state.lock().await;
        if state.fail_listing {
            return Err(server_error("issue listing unavailable"));
        }

        let page_size = state.page_size.unwrap_or(usize::MAX);
        let mut issues = Vec::with_capacity(state.issues.len());
        let mut pages = 0;
        for page in state.issues.chunks(page_size) {
            pages += 1;
            issues.extend_from_slice(page);
        }
        state.pages_served = pages.max(1);
        Ok(issues)
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, GatewayError> {
        self.state
            .lock()
            .await
            .issues
            .iter()
            .find(|issue| issue.number == number)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("issue #{number}")))
    }

    async fn update_issue_state(&self, number: u64, state: IssueState) -> Result<(), GatewayError> {
        let mut guard = self.state.lock().await;
        if guard.fail_updates.contains(&number) {
            return Err(server_error("issue update rejected"));
        }
        let issue = guard
            .issues
            .iter_mut()
            .find(|issue| issue.number == number)
            .ok_or_else(|| GatewayError::NotFound(format!("issue #{number}")))?;
        issue.state = state;
        guard.calls.push(IssueCall::UpdateState(number, state));
        Ok(())
    }
}

//! GitHub HTTP client with rate limiting.
//!
//! Wraps the GitHub REST API v3 for a single repository. Listing follows
//! the `Link: rel="next"` header until every page has been read.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LINK;
use reqwest::{Client, Method, RequestBuilder, Response};
use tokio::sync::Mutex;
use tracing::debug;

use crate::adapters::rate_limiter::RateLimiter;
use crate::domain::models::{GitHubConfig, Issue, IssueState};
use crate::domain::ports::{GatewayError, IssueGateway};

use super::models::{GitHubIssue, GitHubIssueUpdateRequest};

const USER_AGENT: &str = concat!("gh-todoist-sync/", env!("CARGO_PKG_VERSION"));

/// Page size requested from the list endpoint (the API maximum).
pub const PAGE_SIZE: u32 = 100;

/// HTTP client for the issues of one GitHub repository.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    token: String,
    owner: String,
    repo: String,
    base_url: String,
    /// Shared across clones (5 000 req/hr for authenticated requests).
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Build a client from configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            token: config.token.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::github())),
        })
    }

    /// `owner/repo` of the tracked repository.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/{}/issues", self.base_url, self.owner, self.repo)
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
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

/// Extract the `rel="next"` target from a `Link` header.
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[async_trait]
impl IssueGateway for GitHubClient {
    async fn list_issues(&self) -> Result<Vec<Issue>, GatewayError> {
        let mut url = format!("{}?state=all&per_page={PAGE_SIZE}", self.issues_url());
        let mut issues = Vec::new();
        let mut pages = 0usize;

        loop {
            let request = self.rate_limited_request(Method::GET, &url).await;
            let resp = self.send(request, &format!("issues of {}", self.repository())).await?;

            let next = resp
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page_url);

            let page: Vec<GitHubIssue> = resp.json().await?;
            pages += 1;
            debug!(page = pages, count = page.len(), "fetched issue page");
            issues.extend(page.into_iter().map(Issue::from));

            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        Ok(issues)
    }

    async fn get_issue(&self, number: u64) -> Result<Issue, GatewayError> {
        let url = format!("{}/{number}", self.issues_url());
        let request = self.rate_limited_request(Method::GET, &url).await;
        let resp = self.send(request, &format!("issue #{number}")).await?;
        let raw: GitHubIssue = resp.json().await?;
        Ok(raw.into())
    }

    async fn update_issue_state(&self, number: u64, state: IssueState) -> Result<(), GatewayError> {
        let url = format!("{}/{number}", self.issues_url());
        let body = GitHubIssueUpdateRequest {
            state: state.as_str().to_string(),
        };
        let request = self
            .rate_limited_request(Method::PATCH, &url)
            .await
            .json(&body);
        self.send(request, &format!("issue #{number}")).await?;
        Ok(())
    }
}

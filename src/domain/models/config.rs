//! Application configuration model.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure for the synchronizer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub repository and credentials
    #[serde(default)]
    pub github: GitHubConfig,

    /// Todoist credentials and target project
    #[serde(default)]
    pub todoist: TodoistConfig,

    /// Reconciliation behaviour
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Verbose diagnostics; raises the default log level to `debug`
    #[serde(default)]
    pub debug: bool,
}

/// GitHub configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Personal access token
    #[serde(default)]
    pub token: String,

    /// Repository owner (user or organisation)
    #[serde(default)]
    pub owner: String,

    /// Repository name
    #[serde(default)]
    pub repo: String,

    /// REST API base URL
    #[serde(default = "default_github_api_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            owner: String::new(),
            repo: String::new(),
            api_base_url: default_github_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &redacted(&self.token))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Todoist configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TodoistConfig {
    /// API token
    #[serde(default)]
    pub token: String,

    /// Name of the project tasks are synced into; created if missing
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// REST API base URL
    #[serde(default = "default_todoist_api_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_project_name() -> String {
    "GitHub Sync".to_string()
}

fn default_todoist_api_url() -> String {
    "https://api.todoist.com/rest/v2".to_string()
}

impl Default for TodoistConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            project_name: default_project_name(),
            api_base_url: default_todoist_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for TodoistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoistConfig")
            .field("token", &redacted(&self.token))
            .field("project_name", &self.project_name)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Upper bound for the daemon interval (one year).
pub const MAX_INTERVAL_MINUTES: u64 = 525_600;

/// Sync loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncConfig {
    /// Minutes between full passes in daemon mode
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// Run a full pass as soon as the daemon starts
    #[serde(default = "default_true")]
    pub run_on_startup: bool,

    /// Also push label differences on existing tasks
    #[serde(default)]
    pub update_labels: bool,
}

const fn default_interval_minutes() -> u64 {
    15
}

const fn default_true() -> bool {
    true
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            run_on_startup: true,
            update_labels: false,
        }
    }
}

impl SyncConfig {
    /// Interval between passes. Saturates instead of overflowing.
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "[REDACTED]"
    }
}

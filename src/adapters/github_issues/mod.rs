//! GitHub Issues adapter.
//!
//! Implements [`IssueGateway`](crate::domain::ports::IssueGateway) on top of
//! the GitHub REST API v3.

pub mod client;
pub mod models;

pub use client::GitHubClient;

//! Todoist adapter.
//!
//! Implements [`TaskGateway`](crate::domain::ports::TaskGateway) on top of
//! the Todoist REST API v2.

pub mod client;
pub mod models;

pub use client::TodoistClient;

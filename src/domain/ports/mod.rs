//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - IssueGateway: GitHub issue listing, lookup and state changes
//! - TaskGateway: Todoist project and task operations
//!
//! These traits keep the reconciliation logic independent of HTTP clients.

pub mod errors;
pub mod issue_gateway;
pub mod task_gateway;

pub use errors::GatewayError;
pub use issue_gateway::IssueGateway;
pub use task_gateway::TaskGateway;

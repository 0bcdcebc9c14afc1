//! In-memory gateways.
//!
//! Used by the test suites and for dry runs against fixture data. Both
//! gateways record every mutating call and support failure injection.

pub mod issue_gateway;
pub mod task_gateway;

pub use issue_gateway::{InMemoryIssueGateway, IssueCall};
pub use task_gateway::{InMemoryTaskGateway, TaskCall};

//! Domain layer for the GitHub ↔ Todoist synchronizer
//!
//! This module contains the models, errors and port traits.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};

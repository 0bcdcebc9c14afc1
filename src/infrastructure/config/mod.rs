//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - The plain environment variables of the classic deployment
//! - Prefixed environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};

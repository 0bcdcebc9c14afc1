//! Infrastructure layer module
//!
//! Configuration loading (figment) and logging (tracing).

pub mod config;
pub mod logging;

//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::models::MAX_INTERVAL_MINUTES;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "gh-todoist-sync")]
#[command(about = "Two-way sync between GitHub issues and a Todoist project", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Mode to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of .gh-todoist-sync/config.yaml
    #[arg(short, long, global = true, env = "GH_TODOIST_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Sync modes.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run one full sync (GitHub → Todoist, then Todoist → GitHub)
    Once,

    /// Only push GitHub issues into Todoist
    GithubOnly,

    /// Only push Todoist completion back to GitHub issues
    TodoistOnly,

    /// Run full syncs on an interval until interrupted
    Daemon {
        /// Minutes between passes (overrides sync.interval_minutes)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=MAX_INTERVAL_MINUTES))]
        interval_minutes: Option<u64>,

        /// Wait one interval before the first pass
        #[arg(long)]
        skip_initial: bool,
    },
}

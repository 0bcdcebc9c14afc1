//! gh-todoist-sync CLI entry point.

use clap::Parser;

use gh_todoist_sync::cli::commands::{daemon, sync, sync::SyncMode};
use gh_todoist_sync::cli::{handle_error, Cli, Commands};
use gh_todoist_sync::infrastructure::logging::{LogConfig, LoggerImpl};
use gh_todoist_sync::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli).await {
        handle_error(err, cli.json);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = ConfigLoader::load_from(cli.config.as_deref())?;
    if cli.verbose {
        config.debug = true;
    }

    let _logger = LoggerImpl::init(&LogConfig::from_settings(&config.logging, config.debug))?;
    tracing::debug!(?config, "configuration loaded");

    match &cli.command {
        Commands::Once => sync::execute(&config, SyncMode::Full, cli.json).await,
        Commands::GithubOnly => sync::execute(&config, SyncMode::GitHubOnly, cli.json).await,
        Commands::TodoistOnly => sync::execute(&config, SyncMode::TodoistOnly, cli.json).await,
        Commands::Daemon {
            interval_minutes,
            skip_initial,
        } => daemon::execute(&config, *interval_minutes, *skip_initial, cli.json).await,
    }
}

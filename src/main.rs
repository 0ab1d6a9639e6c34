//! Kin - memory capture screen-flow prototype

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kin::cli::commands::{
    click::ClickCommand, prompts::PromptsCommand, screens::ScreensCommand, CommandHandler,
};
use kin::cli::{Cli, Commands, LogLevel};
use kin::config::KinConfig;

/// Initialize tracing with CLI flags
///
/// Logs go to `log_file` when given. Otherwise they go to stderr, except for
/// interactive commands where stderr belongs to the terminal UI.
fn initialize_tracing(
    log_level: &LogLevel,
    log_file: Option<&Path>,
    interactive: bool,
) -> Result<()> {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(
        &cli.log_level,
        cli.log_file.as_deref(),
        cli.command.is_interactive(),
    )?;

    let config =
        KinConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(command = cli.command.name(), config = ?config, "Starting");

    let handler: Box<dyn CommandHandler> = match cli.command {
        #[cfg(feature = "tui")]
        Commands::Tui => {
            let mut controller = kin::Controller::from_config(&config)?;
            controller.init()?;
            kin::cli::tui::run(controller).await?;
            return Ok(());
        }
        Commands::Click { steps, format } => Box::new(ClickCommand::new(config, steps, format)),
        Commands::Prompts { category, format } => {
            Box::new(PromptsCommand::new(config, category, format))
        }
        Commands::Screens { format } => Box::new(ScreensCommand::new(config, format)),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handler
        .execute(&mut out)
        .with_context(|| format!("{} failed", handler.name()))?;
    Ok(())
}

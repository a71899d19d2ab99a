//! xgo - Go CGO cross compiler
//!
//! CLI entry point: loads configuration and runs the build command.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use xgo::cli::Cli;
use xgo::config::{Config, ConfigManager};
use xgo::error::XgoResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> XgoResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.log, &config);
    debug!("Configuration: {}", config_manager.path().display());

    xgo::cli::commands::build(cli.build, &config).await
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(level: u8, config: &Config) {
    let filter = match level {
        0 => EnvFilter::new("xgo=warn"),
        1 => EnvFilter::new("xgo=info"),
        _ => EnvFilter::new("xgo=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

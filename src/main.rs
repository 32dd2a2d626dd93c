use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod error;

use cli::Cli;
use config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.log_level.as_deref(), &config.logging.level);

    match commands::run(cli.command, config.map) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `--log-level` wins, then `RUST_LOG`, then the config file. Core `log`
/// records reach the subscriber through the `tracing-log` bridge.
fn init_tracing(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config_level)),
    }
    .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

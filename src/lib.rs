//! notepress - publish wiki-style markdown notes as static site page bundles

pub mod cli;
pub mod domain;
pub mod export;
pub mod infra;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_config, handle_export},
    messages::{Locale, Messages},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let messages = Messages::new(Locale::detect(
        cli.lang.as_deref().or(config.lang.as_deref()),
    ));
    debug!(config = %config_path.display(), locale = ?messages.locale(), "loaded settings");

    match &cli.command {
        Command::Export(args) => handle_export(args, &config, &messages),
        Command::Config(args) => handle_config(args, &config_path, &config, &messages),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Initialise the diagnostic log on stderr.
///
/// Uses `RUST_LOG` if set. Otherwise the log is off by default, since
/// notifications already go to stderr, and `-v` / `-vv` enable `info` /
/// `debug`.
fn init_logging(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("off"),
            1 => EnvFilter::new("info"),
            _ => EnvFilter::new("debug"),
        }
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Termfetch - GitHub, news, Reddit and weather in the terminal
//!
//! A CLI tool that queries several public HTTP APIs from simple flags
//! and prints the results, including ASCII-art renderings of images.
//!
//! Exit codes:
//!   0 - Every requested query ran (individual fetches may have failed)
//!   1 - Invalid arguments or configuration, or no query requested

mod analysis;
mod ascii;
mod cli;
mod client;
mod config;
mod dispatch;
mod error;
mod models;
mod render;
mod scaffold;

#[cfg(test)]
mod testutil;

use anyhow::{Context, Result};
use clap::CommandFactory;
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use dispatch::Dispatcher;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let queries = args.queries();
    if queries.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(&args);

    info!("Termfetch v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let dispatcher = Dispatcher::new(config, !args.quiet)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = dispatcher.run(&queries, &mut out).await;

    info!(
        "Done: {} queries succeeded, {} failed",
        summary.succeeded, summary.failed
    );

    Ok(())
}

/// Print help to stdout, used when no query flag was given.
fn print_usage() {
    let mut command = Args::command();
    if let Err(e) = command.print_help() {
        eprintln!("Error: {}", e);
    }
    println!();
}

/// Handle --init-config: generate a default .termfetch.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    println!("Edit it to set API keys, endpoints and the image width.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so they never mix with results on stdout.
/// `RUST_LOG` overrides the level derived from the flags.
fn init_logging(args: &Args) {
    let level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("termfetch={}", level.as_str().to_lowercase())));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}

//! cli
//!
//! Command-line interface for the `plate` binary.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging and load configuration
//! - Delegate to command handlers
//!
//! The CLI layer is thin: handlers call into [`crate::core`] and print the
//! result through [`crate::ui`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// State shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    pub verbosity: Verbosity,
    /// Print JSON instead of text
    pub json: bool,
    pub config: Config,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_logging(verbosity);

    let config = Config::load().context("Failed to load config")?;
    let ctx = Context {
        verbosity,
        json: cli.json,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the `tracing` subscriber. `RUST_LOG` overrides the default
/// filter for the given verbosity. Logs go to stderr.
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    // A subscriber may already be installed when run from tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

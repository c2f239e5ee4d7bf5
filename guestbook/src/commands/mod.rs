// guestbook/src/commands/mod.rs
//! Command dispatch and configuration layering shared by all commands.

use anyhow::{Context, Result};
use std::path::Path;

use guestbook_core::GuestbookConfig;

use crate::cli::{Cli, Commands};

pub mod check;
pub mod update;

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Update(cmd) => update::run_update_command(config, cmd).await,
        Commands::Check(cmd) => check::run_check_command(&config, cmd),
    }
}

/// An explicit `--config` must exist; otherwise the usual locations are
/// searched and the built-in defaults used when none exists.
pub fn load_config(explicit: Option<&Path>) -> Result<GuestbookConfig> {
    match explicit {
        Some(path) => GuestbookConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => GuestbookConfig::discover().context("Failed to load configuration"),
    }
}

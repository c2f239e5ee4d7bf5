// guestbook/src/cli.rs
//! Command-line interface of the `guestbook` binary.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "guestbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep a moderated guestbook of issue comments inside your README",
    long_about = "Guestbook reads the most recently updated comments of one GitHub issue, removes abusive ones, and writes the newest clean ones between two marker comments of a Markdown document.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Only report errors.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "FILE", global = true, help = "Path to a YAML configuration file.")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetches, moderates and renders comments into the document.
    #[command(about = "Refresh the guestbook section of the document.")]
    Update(UpdateCommand),

    /// Sanitizes a piece of text the way a comment body would be.
    #[command(about = "Show how a comment body would be sanitized and classified.")]
    Check(CheckCommand),
}

/// Arguments for the `update` command. Every flag overrides the config file.
#[derive(Parser, Debug, Default)]
pub struct UpdateCommand {
    #[arg(long, value_name = "FILE", help = "Document containing the guestbook markers.")]
    pub document: Option<PathBuf>,

    #[arg(long, value_name = "OWNER", help = "Owner of the repository hosting the guestbook issue.")]
    pub owner: Option<String>,

    #[arg(long, value_name = "NAME", help = "Name of the repository hosting the guestbook issue.")]
    pub repo: Option<String>,

    #[arg(long, value_name = "N", help = "Number of the guestbook issue.")]
    pub issue: Option<u64>,

    #[arg(long, value_name = "N", help = "Number of clean comments to show.")]
    pub limit: Option<usize>,

    #[arg(long = "fetch-count", value_name = "N", help = "Number of recent comments to fetch.")]
    pub fetch_count: Option<usize>,

    #[arg(long = "api-url", value_name = "URL", help = "GraphQL endpoint of the comment source.")]
    pub api_url: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN", help = "API token used to read and delete comments.")]
    pub token: Option<String>,

    #[arg(long = "no-remove", help = "Skip flagged comments without deleting them.")]
    pub no_remove: bool,

    #[arg(long = "dry-run", help = "Print the updated document instead of writing it. Nothing is deleted.")]
    pub dry_run: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug, Default)]
pub struct CheckCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input: Option<PathBuf>,
}

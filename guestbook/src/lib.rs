// guestbook/src/lib.rs
//! # Guestbook CLI
//!
//! Command-line front end for `guestbook-core`: argument parsing, logger
//! bootstrap, configuration layering and the `update` / `check` commands.

pub mod cli;
pub mod commands;
pub mod logger;

pub use cli::{CheckCommand, Cli, Commands, UpdateCommand};
pub use commands::run;

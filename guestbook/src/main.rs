// guestbook/src/main.rs
//! Guestbook entry point.

use clap::Parser;
use log::error;

use guestbook::cli::Cli;
use guestbook::{commands, logger};

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    logger::init_logger(logger::level_override(args.quiet, args.debug));

    if let Err(err) = commands::run(args).await {
        error!("{:?}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

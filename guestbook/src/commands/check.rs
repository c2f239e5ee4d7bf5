// guestbook/src/commands/check.rs
//! The `check` command: classify and sanitize a body offline.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};

use guestbook_core::{GuestbookConfig, ProfanityClassifier, TextSanitizer};

use crate::cli::CheckCommand;

/// Sanitizes `input` with the configured dictionary and length budget.
/// Returns the single-line rendition and whether the raw text is flagged.
pub fn check_text(config: &GuestbookConfig, input: &str) -> Result<(String, bool)> {
    config.validate()?;
    let baseline = config.classifier.load_baseline()?;
    let classifier = ProfanityClassifier::new(&baseline, &config.classifier)?;
    let sanitizer = TextSanitizer::new(config.max_body_length);
    Ok((sanitizer.sanitize(input, &classifier), classifier.is_profane(input)))
}

pub fn run_check_command(config: &GuestbookConfig, cmd: CheckCommand) -> Result<()> {
    let input = match &cmd.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    let (sanitized, flagged) = check_text(config, &input)?;

    writeln!(io::stdout().lock(), "{}", sanitized)?;
    writeln!(io::stderr().lock(), "{}", if flagged { "flagged" } else { "clean" })?;
    Ok(())
}

//! errors.rs - Custom error types for the guestbook-core library.
//!
//! Every failure the update pipeline can hit is one variant of
//! [`GuestbookError`]. Fatal and recoverable failures share the enum; the
//! pipeline decides which ones abort a run (see `pipeline`).
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `guestbook-core` library.
///
/// `#[non_exhaustive]` leaves room for new variants without breaking
/// downstream `match` statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GuestbookError {
    /// The upstream comment source could not deliver a batch. Fatal.
    #[error("Failed to fetch comments from {provider}: {message}")]
    SourceFetch { provider: String, message: String },

    /// A single flagged comment could not be deleted. Recovered locally.
    #[error("Failed to remove comment '{id}': {reason}")]
    Removal { id: String, reason: String },

    /// The document lacks a matched pair of sentinel markers. Fatal.
    #[error("Document must contain the marker '{marker}' twice, found {found} occurrence(s)")]
    MarkerNotFound { marker: String, found: usize },

    /// A clean comment could not be turned into an entry. Fatal.
    #[error("Failed to render comment '{id}': {reason}")]
    Render { id: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid word list: {0}")]
    Wordlist(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}

impl GuestbookError {
    /// Whether the pipeline keeps running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GuestbookError::Removal { .. })
    }
}

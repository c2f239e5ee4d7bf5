// guestbook-core/src/lib.rs
//! # Guestbook Core Library
//!
//! `guestbook-core` keeps a small, moderated guestbook of issue comments inside
//! a host document (typically a profile README). It takes the most recent
//! comments of one issue thread, removes abusive ones at the source, renders the
//! rest into fixed-size entries and splices them between two sentinel markers.
//!
//! ## Modules
//!
//! * `classifier`: Dictionary-based `ProfanityClassifier` with token masking.
//! * `sanitizer`: `TextSanitizer`, which turns an untrusted body into a bounded single line.
//! * `moderation`: `ModerationEngine` and the `CommentRemover` seam for best-effort removal.
//! * `render`: `EntryRenderer`, the fixed entry template.
//! * `splice`: `DocumentSplicer`, which rewrites the managed region of a document.
//! * `source`: The `CommentSource` seam.
//! * `providers`: The GitHub GraphQL implementation of both seams.
//! * `document`: `DocumentStore` and the file-backed `FileDocument`.
//! * `config`: `GuestbookConfig`, word lists and their merging.
//! * `pipeline`: The end-to-end update run.
//! * `errors`: `GuestbookError`.
//!
//! ## Usage Example
//!
//! ```rust
//! use guestbook_core::{DocumentSplicer, EntryRenderer, ProfanityClassifier, RenderedEntry};
//!
//! let classifier = ProfanityClassifier::with_defaults().unwrap();
//! assert!(classifier.is_profane("what the fuck"));
//! assert_eq!(classifier.mask("what the fuck"), "what the ****");
//!
//! let splicer = DocumentSplicer::new("<!--guestbook-->").unwrap();
//! let doc = "# Hello\n<!--guestbook--><!--guestbook-->\n";
//! let updated = splicer.splice(doc, &[RenderedEntry::new("entry")]).unwrap();
//! assert_eq!(updated, "# Hello\n<!--guestbook-->\n\nentry\n\n<!--guestbook-->\n");
//! # let _ = EntryRenderer::default();
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`GuestbookError`]. Only removal failures are
//! recovered inside the library; everything else propagates to the caller.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod classifier;
pub mod config;
pub mod document;
pub mod errors;
pub mod model;
pub mod moderation;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod sanitizer;
pub mod source;
pub mod splice;

/// Re-exports the configuration types and word-list helpers.
pub use config::{
    config_candidate_paths,
    merge_words,
    ClassifierConfig,
    GuestbookConfig,
    RepositoryConfig,
    Wordlist,
};

pub use errors::GuestbookError;

pub use model::{Author, Comment, CommentId, RenderedEntry};

pub use classifier::ProfanityClassifier;
pub use sanitizer::{TextSanitizer, CODE_BLOCK_PLACEHOLDER, ELLIPSIS};

/// Re-exports the moderation pass and its removal seam.
pub use moderation::{
    CommentRemover,
    FlaggedFingerprint,
    ModerationEngine,
    ModerationResult,
    RemovalOutcome,
};

pub use render::EntryRenderer;
pub use splice::DocumentSplicer;
pub use source::CommentSource;
pub use document::{DocumentStore, FileDocument};
pub use providers::GitHubClient;

/// Re-exports the end-to-end run.
pub use pipeline::{run_update, GuestbookPipeline, UpdateOptions, UpdateReport};

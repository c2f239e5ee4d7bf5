// guestbook-core/src/moderation/mod.rs
//! Moderation of a comment batch: classification, best-effort removal at the
//! source, and selection of the clean comments that get rendered.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::errors::GuestbookError;
use crate::model::{Comment, CommentId};

pub mod engine;
pub mod fingerprint;

pub use engine::ModerationEngine;
pub use fingerprint::FlaggedFingerprint;

/// Deletes comments at their source.
#[async_trait]
pub trait CommentRemover: Send + Sync {
    fn name(&self) -> &str;

    /// Deletes one comment. Failures are reported as [`GuestbookError::Removal`].
    async fn remove(&self, id: &CommentId) -> Result<(), GuestbookError>;
}

/// State of a removal request for one flagged comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Pending,
    Succeeded,
    Failed(String),
}

/// What a moderation pass produced.
#[derive(Debug, Clone, Default)]
pub struct ModerationResult {
    /// Clean comments in source order, at most `limit` of them.
    pub clean: Vec<Comment>,
    /// Removal outcome per flagged comment. Empty when removal is disabled.
    pub removal_outcomes: BTreeMap<CommentId, RemovalOutcome>,
    /// Every flagged comment of the batch, in source order.
    pub flagged: Vec<FlaggedFingerprint>,
}

impl ModerationResult {
    pub fn removals_succeeded(&self) -> usize {
        self.removal_outcomes
            .values()
            .filter(|o| matches!(o, RemovalOutcome::Succeeded))
            .count()
    }

    pub fn removals_failed(&self) -> usize {
        self.removal_outcomes
            .values()
            .filter(|o| matches!(o, RemovalOutcome::Failed(_)))
            .count()
    }
}

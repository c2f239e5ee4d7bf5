// guestbook-core/src/moderation/engine.rs
//! The moderation pass.
//!
//! Classification runs sequentially in source order. Every flagged comment
//! gets a removal task spawned into a `JoinSet` without waiting for it, and
//! the whole set is joined once after the scan, so a run waits for the slowest
//! removal rather than the sum of them. Removal failures never leave this
//! module as errors; they only show up in the outcome map.

use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::classifier::ProfanityClassifier;
use crate::model::{Comment, CommentId};
use crate::moderation::{CommentRemover, FlaggedFingerprint, ModerationResult, RemovalOutcome};

pub struct ModerationEngine {
    classifier: Arc<ProfanityClassifier>,
    remover: Option<Arc<dyn CommentRemover>>,
    limit: usize,
}

impl ModerationEngine {
    /// An engine that only classifies. Flagged comments are skipped, not removed.
    pub fn new(classifier: Arc<ProfanityClassifier>, limit: usize) -> Self {
        Self { classifier, remover: None, limit }
    }

    /// Enables best-effort removal of flagged comments.
    pub fn with_remover(mut self, remover: Arc<dyn CommentRemover>) -> Self {
        self.remover = Some(remover);
        self
    }

    /// Splits `comments` (newest first) into clean and flagged ones.
    ///
    /// The clean list keeps source order and is cut to `limit` only after the
    /// whole batch was classified.
    pub async fn moderate(&self, comments: Vec<Comment>) -> ModerationResult {
        let total = comments.len();
        let mut clean = Vec::new();
        let mut flagged = Vec::new();
        let mut removal_outcomes: BTreeMap<CommentId, RemovalOutcome> = BTreeMap::new();
        let mut removals = JoinSet::new();

        for comment in comments {
            if !self.classifier.is_profane(&comment.body_text) {
                clean.push(comment);
                continue;
            }

            let fingerprint = FlaggedFingerprint::from_comment(&comment);
            warn!(
                "Flagged comment {} by @{} (body sha256 {}).",
                fingerprint.comment_id,
                fingerprint.author_login,
                fingerprint.short_hash()
            );

            if let Some(remover) = &self.remover {
                removal_outcomes.insert(comment.id.clone(), RemovalOutcome::Pending);
                let remover = Arc::clone(remover);
                let id = comment.id.clone();
                removals.spawn(async move {
                    let result = remover.remove(&id).await;
                    (id, result)
                });
            }
            flagged.push(fingerprint);
        }

        if !removals.is_empty() {
            debug!("Waiting for {} removal request(s).", removals.len());
        }
        while let Some(joined) = removals.join_next().await {
            match joined {
                Ok((id, Ok(()))) => {
                    info!("Removed flagged comment {}.", id);
                    removal_outcomes.insert(id, RemovalOutcome::Succeeded);
                }
                Ok((id, Err(e))) => {
                    error!("Removal failed for comment {}: {}", id, e);
                    removal_outcomes.insert(id, RemovalOutcome::Failed(e.to_string()));
                }
                Err(e) => error!("Removal task aborted: {}", e),
            }
        }
        // A task that panicked never reported its id.
        for outcome in removal_outcomes.values_mut() {
            if *outcome == RemovalOutcome::Pending {
                *outcome = RemovalOutcome::Failed("removal task did not complete".to_string());
            }
        }

        clean.truncate(self.limit);
        info!(
            "Moderated {} comment(s): {} flagged, {} selected.",
            total,
            flagged.len(),
            clean.len()
        );

        ModerationResult { clean, removal_outcomes, flagged }
    }
}

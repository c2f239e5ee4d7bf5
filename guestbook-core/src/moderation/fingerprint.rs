// guestbook-core/src/moderation/fingerprint.rs
use sha2::{Digest, Sha256};

use crate::model::{Comment, CommentId};

/// Number of hex characters shown in logs.
const SHORT_HASH_LEN: usize = 12;

/// A loggable stand-in for a flagged comment. The body itself is never logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedFingerprint {
    pub comment_id: CommentId,
    pub author_login: String,
    pub hash: String,        // SHA-256 of the raw body
    pub detected_at: String, // RFC3339 timestamp
}

impl FlaggedFingerprint {
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            comment_id: comment.id.clone(),
            author_login: comment.author.login.clone(),
            hash: body_hash(&comment.body_text),
            detected_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn short_hash(&self) -> &str {
        &self.hash[..SHORT_HASH_LEN.min(self.hash.len())]
    }
}

pub fn body_hash(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hex::encode(hasher.finalize())
}

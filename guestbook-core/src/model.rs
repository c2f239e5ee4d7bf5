// guestbook-core/src/model.rs
//! Data structures shared by every stage of the guestbook pipeline.
//!
//! Comments and authors are built once per run from the comment source and are
//! never mutated afterwards. A [`RenderedEntry`] is the final, self-contained
//! fragment that ends up inside the managed region of the document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a comment at its source (a GraphQL node id for GitHub).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The account that wrote a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub avatar_url: String,
    pub login: String,
    pub url: String,
}

impl Author {
    /// Stand-in for comments whose author account no longer exists.
    pub fn ghost() -> Self {
        Self {
            avatar_url: "https://avatars.githubusercontent.com/u/10137?v=4".to_string(),
            login: "ghost".to_string(),
            url: "https://github.com/ghost".to_string(),
        }
    }
}

/// One comment on the guestbook thread, as delivered by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: Author,
    /// Raw body text; untrusted.
    pub body_text: String,
    /// RFC 3339 timestamp of the last update. Parsed at render time.
    pub updated_at: String,
}

/// A fully formatted guestbook entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub markup: String,
}

impl RenderedEntry {
    pub fn new(markup: impl Into<String>) -> Self {
        Self { markup: markup.into() }
    }
}

// guestbook-core/src/source.rs
//! The comment source collaborator.

use async_trait::async_trait;

use crate::errors::GuestbookError;
use crate::model::Comment;

/// Supplies the most recently updated comments of the guestbook thread.
#[async_trait]
pub trait CommentSource: Send + Sync {
    fn name(&self) -> &str;

    /// Returns up to `count` comments, newest first.
    ///
    /// Any failure is a [`GuestbookError::SourceFetch`].
    async fn fetch_recent(&self, count: usize) -> Result<Vec<Comment>, GuestbookError>;
}

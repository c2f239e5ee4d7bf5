// guestbook-core/src/render.rs
//! Turns one clean comment into a guestbook entry.
//!
//! The body is sanitized again with the same classifier the moderation pass
//! used, so anything that slipped through moderation is still masked here.
//! Rendering is pure: the avatar URL is only built, never fetched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::classifier::ProfanityClassifier;
use crate::config::DEFAULT_AVATAR_SERVICE;
use crate::errors::GuestbookError;
use crate::model::{Author, Comment, RenderedEntry};
use crate::sanitizer::TextSanitizer;

const ENTRY_TEMPLATE_NAME: &str = "entry";

/// One entry: avatar, fenced body, author credit, and the date as a caption.
const ENTRY_TEMPLATE: &str = r#"<img width="24" height="24" align="center" src="{avatar_url}" alt="{login}"> ```
{body}
``` - {author_link}
> <sup>{date}</sup>"#;

/// `January 5, 2024`
const DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Serialize)]
struct EntryContext<'a> {
    avatar_url: String,
    login: &'a str,
    body: String,
    author_link: String,
    date: String,
}

#[derive(Debug, Clone)]
pub struct EntryRenderer {
    sanitizer: TextSanitizer,
    avatar_service: String,
}

impl Default for EntryRenderer {
    fn default() -> Self {
        Self::new(TextSanitizer::default(), DEFAULT_AVATAR_SERVICE)
    }
}

impl EntryRenderer {
    pub fn new(sanitizer: TextSanitizer, avatar_service: impl Into<String>) -> Self {
        Self { sanitizer, avatar_service: avatar_service.into() }
    }

    /// Circular 24x24 avatar served through the image transform service.
    pub fn avatar_url(&self, author: &Author) -> String {
        format!(
            "{}/?url={}&h=24&w=24&fit=cover&mask=circle&maxage=7d",
            self.avatar_service.trim_end_matches('/'),
            urlencoding::encode(&author.avatar_url)
        )
    }

    pub fn render(
        &self,
        comment: &Comment,
        classifier: &ProfanityClassifier,
    ) -> Result<RenderedEntry, GuestbookError> {
        let render_error = |reason: String| GuestbookError::Render {
            id: comment.id.to_string(),
            reason,
        };

        let date = format_date(&comment.updated_at).map_err(render_error)?;
        let context = EntryContext {
            avatar_url: self.avatar_url(&comment.author),
            login: &comment.author.login,
            body: self.sanitizer.sanitize(&comment.body_text, classifier),
            author_link: format!("[@{}]({})", comment.author.login, comment.author.url),
            date,
        };

        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template(ENTRY_TEMPLATE_NAME, ENTRY_TEMPLATE)
            .map_err(|e| render_error(e.to_string()))?;
        let markup = tt
            .render(ENTRY_TEMPLATE_NAME, &context)
            .map_err(|e| render_error(e.to_string()))?;

        Ok(RenderedEntry::new(markup))
    }
}

/// Formats an RFC 3339 timestamp as `<Month> <Day>, <Year>` in UTC.
pub fn format_date(timestamp: &str) -> Result<String, String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp.trim())
        .map_err(|e| format!("malformed timestamp '{}': {}", timestamp, e))?;
    Ok(parsed.with_timezone(&Utc).format(DATE_FORMAT).to_string())
}

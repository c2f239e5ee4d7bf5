// guestbook-core/src/splice.rs
//! Replaces the managed region of a document.
//!
//! The managed region is everything strictly between the first occurrence of
//! the marker and the next one. It is always rewritten as a whole, so splicing
//! is idempotent. Text outside the two markers is copied through untouched.

use log::{debug, warn};

use crate::config::DEFAULT_MARKER;
use crate::errors::GuestbookError;
use crate::model::RenderedEntry;

const ENTRY_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSplicer {
    marker: String,
}

impl Default for DocumentSplicer {
    fn default() -> Self {
        Self { marker: DEFAULT_MARKER.to_string() }
    }
}

impl DocumentSplicer {
    pub fn new(marker: impl Into<String>) -> Result<Self, GuestbookError> {
        let marker = marker.into();
        if marker.is_empty() {
            return Err(GuestbookError::Config("`marker` cannot be empty.".to_string()));
        }
        Ok(Self { marker })
    }

    /// Byte range of the managed region.
    pub fn managed_region(&self, document: &str) -> Result<(usize, usize), GuestbookError> {
        let marker = self.marker.as_str();
        let not_found = |found| GuestbookError::MarkerNotFound { marker: marker.to_string(), found };

        let open = document.find(marker).ok_or_else(|| not_found(0))?;
        let start = open + marker.len();
        let end = document[start..]
            .find(marker)
            .map(|offset| start + offset)
            .ok_or_else(|| not_found(1))?;
        Ok((start, end))
    }

    /// Writes `entries` into the managed region, separated and padded by blank lines.
    pub fn splice(&self, document: &str, entries: &[RenderedEntry]) -> Result<String, GuestbookError> {
        let (start, end) = self.managed_region(document)?;

        // A marker inside an entry would move the region boundary on the next run.
        let bodies: Vec<String> = entries
            .iter()
            .map(|entry| {
                let mut markup = entry.markup.clone();
                if markup.contains(&self.marker) {
                    warn!("Removing marker literal found inside a rendered entry.");
                    // One removal can join the halves of another, e.g. "xxyy" for "xy".
                    while markup.contains(&self.marker) {
                        markup = markup.replace(&self.marker, "");
                    }
                }
                markup
            })
            .collect();

        let region = format!(
            "{sep}{}{sep}",
            bodies.join(ENTRY_SEPARATOR),
            sep = ENTRY_SEPARATOR
        );
        debug!(
            "Replacing managed region of {} byte(s) with {} entr(ies), {} byte(s).",
            end - start,
            entries.len(),
            region.len()
        );

        let mut spliced = String::with_capacity(document.len() - (end - start) + region.len());
        spliced.push_str(&document[..start]);
        spliced.push_str(&region);
        spliced.push_str(&document[end..]);
        Ok(spliced)
    }
}

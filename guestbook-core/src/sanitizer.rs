// guestbook-core/src/sanitizer.rs
//! Normalizes an untrusted comment body into a bounded, single-line string.
//!
//! The steps run in a fixed order:
//!
//! 1. mask blocked terms on the raw text,
//! 2. strip markup,
//! 3. replace fenced code blocks with [`CODE_BLOCK_PLACEHOLDER`]
//!    (steps 2 and 3 repeat until neither changes the text), then shorten
//!    any unpaired fence left over to two backticks,
//! 4. collapse line breaks into single spaces,
//! 5. trim,
//! 6. truncate to the character budget and append [`ELLIPSIS`],
//! 7. mask again, for terms that only appeared once markup was gone.
//!
//! Running the sanitizer on its own output is a no-op.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::classifier::ProfanityClassifier;
use crate::config::DEFAULT_MAX_BODY_LENGTH;

pub const CODE_BLOCK_PLACEHOLDER: &str = "[code block removed]";
pub const ELLIPSIS: &str = "...";

lazy_static! {
    static ref HTML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?(?:-->|$)").unwrap();
    /// Elements whose content is never shown as text.
    static ref NON_TEXT_ELEMENTS: Vec<Regex> = ["script", "style", "textarea", "option"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?(?:</{tag}\s*>|$)")).unwrap()
        })
        .collect();
    static ref TAG: Regex = Regex::new(r"<(?:/?[A-Za-z][^<>]*|![^<>]*|\?[^<>]*)>").unwrap();
    static ref FENCED_CODE_BLOCK: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref BACKTICK_FENCE: Regex = Regex::new(r"`{3,}").unwrap();
    static ref LINE_BREAK_RUN: Regex = Regex::new(r"\s*[\r\n]\s*").unwrap();
}

/// Applies the sanitization pipeline with a fixed length budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSanitizer {
    max_length: usize,
}

impl Default for TextSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_LENGTH)
    }
}

impl TextSanitizer {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Runs every step over `raw`. The result never contains a line break and
    /// never exceeds `max_length` characters plus the ellipsis.
    pub fn sanitize(&self, raw: &str, classifier: &ProfanityClassifier) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let masked_tag = masked_tag_pattern(classifier.mask_char());
        let mut text = classifier.mask(raw);
        // Replacing a code block can close a tag opened before it, e.g. "<a```<```>".
        loop {
            let next = remove_code_blocks(&strip_tags(&text, masked_tag.as_ref()));
            if next == text {
                break;
            }
            text = next;
        }
        let text = break_fences(&text);
        let single_line = collapse_line_breaks(&text);
        let truncated = truncate(single_line.trim(), self.max_length);
        // Terms split by markup, or cut to a bare stem, only show up now.
        let result = classifier.mask(&truncated);

        debug!(
            "Sanitized body: {} chars in, {} chars out.",
            raw.chars().count(),
            result.chars().count()
        );
        result
    }
}

/// Matches a tag whose name was masked before stripping, e.g. `</****>`.
fn masked_tag_pattern(mask_char: char) -> Option<Regex> {
    if mask_char.is_alphanumeric() {
        return None;
    }
    let mask = regex::escape(&mask_char.to_string());
    Regex::new(&format!(r"</?{mask}+(?:[\s/][^<>]*)?>")).ok()
}

/// Removes every markup tag and the content of non-text elements. Tags whose
/// name is made of `mask_char` only are removed as well.
pub fn strip_markup(text: &str, mask_char: char) -> String {
    strip_tags(text, masked_tag_pattern(mask_char).as_ref())
}

fn strip_tags(text: &str, masked_tag: Option<&Regex>) -> String {
    let mut current = HTML_COMMENT.replace_all(text, "").into_owned();
    for element in NON_TEXT_ELEMENTS.iter() {
        current = element.replace_all(&current, "").into_owned();
    }
    // Removing one tag can join the halves of another, e.g. `<<b>b>`.
    loop {
        let mut next = TAG.replace_all(&current, "").into_owned();
        if let Some(masked_tag) = masked_tag {
            next = masked_tag.replace_all(&next, "").into_owned();
        }
        if next == current {
            return current;
        }
        current = next;
    }
}

pub fn remove_code_blocks(text: &str) -> String {
    FENCED_CODE_BLOCK.replace_all(text, CODE_BLOCK_PLACEHOLDER).into_owned()
}

/// Shortens every run of three or more backticks to two, so no fence is
/// left to close the code span an entry wraps the body in.
pub fn break_fences(text: &str) -> String {
    BACKTICK_FENCE.replace_all(text, "``").into_owned()
}

pub fn collapse_line_breaks(text: &str) -> String {
    LINE_BREAK_RUN.replace_all(text, " ").into_owned()
}

/// Cuts `text` to `max_length` characters, appending [`ELLIPSIS`] when anything was cut.
pub fn truncate(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

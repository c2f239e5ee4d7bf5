// guestbook-core/src/classifier.rs
//! Dictionary-based profanity classifier.
//!
//! The dictionary is merged once at construction time (baseline + extension
//! list - allowed list) and compiled into a single case-insensitive regular
//! expression anchored on word boundaries. The classifier is immutable after
//! construction, so one instance can be shared between the moderation pass and
//! the render pass.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{merge_words, ClassifierConfig, Wordlist};
use crate::errors::GuestbookError;

/// Upper bound for the compiled dictionary automaton.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Binary profanity classifier with token-level masking.
#[derive(Debug, Clone)]
pub struct ProfanityClassifier {
    /// `None` when the dictionary is empty; nothing is ever flagged then.
    pattern: Option<Regex>,
    terms: Vec<String>,
    mask_char: char,
}

impl ProfanityClassifier {
    /// Builds a classifier from a baseline dictionary and the deployment's extensions.
    pub fn new(baseline: &Wordlist, config: &ClassifierConfig) -> Result<Self, GuestbookError> {
        Self::from_terms(merge_words(baseline, config), config.mask_char)
    }

    /// Builds a classifier from the embedded baseline dictionary only.
    pub fn with_defaults() -> Result<Self, GuestbookError> {
        let baseline =
            Wordlist::load_default().map_err(|e| GuestbookError::Wordlist(format!("{:#}", e)))?;
        Self::new(&baseline, &ClassifierConfig::default())
    }

    /// Compiles an already merged list of terms.
    pub fn from_terms(mut terms: Vec<String>, mask_char: char) -> Result<Self, GuestbookError> {
        terms.retain(|t| !t.trim().is_empty());

        let invalid: Vec<&str> = terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| {
                !t.chars().next().is_some_and(is_word_char)
                    || !t.chars().last().is_some_and(is_word_char)
            })
            .collect();
        if !invalid.is_empty() {
            return Err(GuestbookError::Wordlist(format!(
                "terms must start and end with a letter or digit: {}",
                invalid.join(", ")
            )));
        }

        // Longest first, so a term always wins over its own prefix.
        terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        terms.dedup();

        let pattern = if terms.is_empty() {
            None
        } else {
            let alternation = terms
                .iter()
                .map(|term| {
                    term.split_whitespace()
                        .map(regex::escape)
                        .collect::<Vec<_>>()
                        .join(r"\s+")
                })
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
                .case_insensitive(true)
                .size_limit(REGEX_SIZE_LIMIT)
                .build()
                .map_err(|e| GuestbookError::Wordlist(e.to_string()))?;
            Some(regex)
        };

        debug!("Profanity classifier compiled with {} terms.", terms.len());
        Ok(Self { pattern, terms, mask_char })
    }

    /// Returns `true` if `text` contains at least one blocked term.
    pub fn is_profane(&self, text: &str) -> bool {
        match &self.pattern {
            Some(pattern) if !text.is_empty() => pattern.is_match(text),
            _ => false,
        }
    }

    /// Replaces every non-whitespace character of each blocked term with the
    /// mask symbol. Text without blocked terms is returned unchanged.
    pub fn mask(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };
        pattern
            .replace_all(text, |caps: &regex::Captures| {
                caps[0]
                    .chars()
                    .map(|c| if c.is_whitespace() { c } else { self.mask_char })
                    .collect::<String>()
            })
            .into_owned()
    }

    /// The merged dictionary, longest term first.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(terms: &[&str]) -> ProfanityClassifier {
        ProfanityClassifier::from_terms(terms.iter().map(|t| t.to_string()).collect(), '*').unwrap()
    }

    #[test]
    fn test_detects_terms_case_insensitively() {
        let c = classifier(&["darn"]);
        assert!(c.is_profane("Well DARN it"));
        assert!(c.is_profane("darn"));
        assert!(!c.is_profane("nothing to see"));
    }

    #[test]
    fn test_respects_word_boundaries() {
        let c = classifier(&["ass"]);
        assert!(!c.is_profane("a classic class assignment"));
        assert!(c.is_profane("what an ass."));
        assert_eq!(c.mask("class ass"), "class ***");
    }

    #[test]
    fn test_mask_preserves_length_and_surroundings() {
        let c = classifier(&["darn", "heck"]);
        assert_eq!(c.mask("Darn, what the heck!"), "****, what the ****!");
    }

    #[test]
    fn test_longer_terms_win_over_prefixes() {
        let c = classifier(&["bull", "bullshit"]);
        assert_eq!(c.mask("total bullshit"), "total ********");
        assert_eq!(c.terms()[0], "bullshit");
    }

    #[test]
    fn test_phrases_tolerate_extra_whitespace() {
        let c = classifier(&["son of a gun"]);
        assert!(c.is_profane("you son  of a\ngun"));
        assert_eq!(c.mask("son of a gun"), "*** ** * ***");
    }

    #[test]
    fn test_empty_input_and_empty_dictionary() {
        let c = classifier(&["darn"]);
        assert!(!c.is_profane(""));
        assert_eq!(c.mask(""), "");

        let empty = classifier(&[]);
        assert!(!empty.is_profane("darn"));
        assert_eq!(empty.mask("darn"), "darn");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let c = classifier(&["a.b"]);
        assert!(c.is_profane("a.b"));
        assert!(!c.is_profane("axb"));
    }

    #[test]
    fn test_rejects_terms_with_symbol_edges() {
        let err = ProfanityClassifier::from_terms(vec!["f*ck*".to_string()], '*').unwrap_err();
        assert!(matches!(err, GuestbookError::Wordlist(_)));
    }

    #[test]
    fn test_extension_list_is_merged_with_defaults() {
        let baseline = Wordlist::load_default().unwrap();
        let config = ClassifierConfig {
            extra_words: vec!["exampleBadWord1".to_string()],
            ..Default::default()
        };
        let c = ProfanityClassifier::new(&baseline, &config).unwrap();
        assert!(c.is_profane("this has exampleBadWord1 in it"));
        assert!(c.is_profane("what the fuck"));
        assert!(!c.is_profane("lovely profile, great work!"));
    }

    #[test]
    fn test_allowed_words_are_removed() {
        let baseline = Wordlist::load_default().unwrap();
        let config = ClassifierConfig {
            allowed_words: vec!["damn".to_string()],
            ..Default::default()
        };
        let c = ProfanityClassifier::new(&baseline, &config).unwrap();
        assert!(!c.is_profane("damn, nice README"));
    }

    #[test]
    fn test_custom_mask_char() {
        let c = ProfanityClassifier::from_terms(vec!["darn".to_string()], '#').unwrap();
        assert_eq!(c.mask("darn"), "####");
    }

    #[test]
    fn test_masking_is_deterministic() {
        let c = ProfanityClassifier::with_defaults().unwrap();
        let input = "Shit happens, but this guestbook is fucking great";
        assert_eq!(c.mask(input), c.mask(input));
        assert!(!c.is_profane(&c.mask(input)));
    }
}

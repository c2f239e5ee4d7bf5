//! Configuration management for `guestbook-core`.
//!
//! This module defines the run configuration (`GuestbookConfig`) and the
//! profanity word list (`Wordlist`). It handles YAML (de)serialization,
//! discovery of the config file on disk, merging the baseline dictionary with
//! per-deployment extensions, and validating the resulting values.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::errors::GuestbookError;

pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_MARKER: &str = "<!--guestbook-->";
pub const DEFAULT_AVATAR_SERVICE: &str = "https://images.weserv.nl";
pub const DEFAULT_MAX_BODY_LENGTH: usize = 200;
pub const DEFAULT_LIMIT: usize = 3;
pub const DEFAULT_FETCH_COUNT: usize = 20;

/// GraphQL connections cap `first` at 100 nodes.
pub const MAX_FETCH_COUNT: usize = 100;

/// File name looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG_FILENAME: &str = "guestbook.yaml";

/// The issue thread that backs the guestbook.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub owner: String,
    pub name: String,
    pub issue_number: u64,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            name: String::new(),
            issue_number: 1,
        }
    }
}

/// Extensions applied on top of the baseline dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// YAML word list replacing the embedded baseline dictionary.
    pub wordlist: Option<PathBuf>,
    /// Additional blocked terms merged into the baseline.
    pub extra_words: Vec<String>,
    /// Terms removed from the merged dictionary.
    pub allowed_words: Vec<String>,
    /// Filler symbol used when masking.
    pub mask_char: char,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            wordlist: None,
            extra_words: Vec::new(),
            allowed_words: Vec::new(),
            mask_char: '*',
        }
    }
}

/// Represents the top-level configuration of a guestbook update run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GuestbookConfig {
    pub repository: RepositoryConfig,
    /// GraphQL endpoint of the comment source.
    pub api_url: String,
    /// How many recently updated comments to fetch (K).
    pub fetch_count: usize,
    /// How many clean comments end up in the document (N).
    pub limit: usize,
    /// Character budget for a sanitized comment body.
    pub max_body_length: usize,
    /// Sentinel literal delimiting the managed region.
    pub marker: String,
    /// Path of the document to splice into.
    pub document: PathBuf,
    /// Base URL of the avatar transform service.
    pub avatar_service: String,
    /// Delete flagged comments at the source.
    pub remove_flagged: bool,
    pub classifier: ClassifierConfig,
}

impl Default for GuestbookConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            api_url: DEFAULT_API_URL.to_string(),
            fetch_count: DEFAULT_FETCH_COUNT,
            limit: DEFAULT_LIMIT,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
            marker: DEFAULT_MARKER.to_string(),
            document: PathBuf::from("README.md"),
            avatar_service: DEFAULT_AVATAR_SERVICE.to_string(),
            remove_flagged: true,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl GuestbookConfig {
    /// Loads a configuration from a YAML file. Missing keys keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GuestbookConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads the first config file found among [`config_candidate_paths`],
    /// falling back to the built-in defaults.
    pub fn discover() -> Result<Self> {
        for candidate in config_candidate_paths() {
            if candidate.is_file() {
                return Self::load_from_file(&candidate);
            }
            debug!("No config file at {}", candidate.display());
        }
        debug!("Using built-in default configuration.");
        Ok(Self::default())
    }

    /// Checks value ranges. Repository coordinates are checked separately by
    /// [`GuestbookConfig::validate_repository`] since offline commands don't need them.
    pub fn validate(&self) -> Result<(), GuestbookError> {
        let mut errors = Vec::new();

        if self.fetch_count == 0 || self.fetch_count > MAX_FETCH_COUNT {
            errors.push(format!(
                "`fetch_count` must be between 1 and {}, got {}.",
                MAX_FETCH_COUNT, self.fetch_count
            ));
        }
        if self.limit == 0 {
            errors.push("`limit` must be at least 1.".to_string());
        } else if self.limit > self.fetch_count {
            errors.push(format!(
                "`limit` ({}) cannot exceed `fetch_count` ({}).",
                self.limit, self.fetch_count
            ));
        }
        if self.max_body_length == 0 {
            errors.push("`max_body_length` must be at least 1.".to_string());
        }
        if self.marker.trim().is_empty() {
            errors.push("`marker` cannot be empty.".to_string());
        }
        if self.classifier.mask_char.is_whitespace() {
            errors.push("`classifier.mask_char` cannot be whitespace.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GuestbookError::Config(errors.join(" ")))
        }
    }

    pub fn validate_repository(&self) -> Result<(), GuestbookError> {
        if self.repository.owner.trim().is_empty() || self.repository.name.trim().is_empty() {
            return Err(GuestbookError::Config(
                "`repository.owner` and `repository.name` are required.".to_string(),
            ));
        }
        if self.repository.issue_number == 0 {
            return Err(GuestbookError::Config(
                "`repository.issue_number` must be a positive issue number.".to_string(),
            ));
        }
        Ok(())
    }
}

impl ClassifierConfig {
    /// The baseline dictionary: the configured `wordlist` file, or the embedded one.
    pub fn load_baseline(&self) -> Result<Wordlist> {
        match &self.wordlist {
            Some(path) => Wordlist::load_from_file(path),
            None => Wordlist::load_default(),
        }
    }
}

/// Places a config file is looked up, in priority order.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILENAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("guestbook").join("config.yaml"));
    }
    paths
}

/// A dictionary of blocked terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Wordlist {
    pub name: String,
    pub version: String,
    pub words: Vec<String>,
}

impl Wordlist {
    /// Loads the baseline dictionary embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default word list from embedded string...");
        let default_yaml = include_str!("../config/default_wordlist.yaml");
        let wordlist: Wordlist =
            serde_yml::from_str(default_yaml).context("Failed to parse default word list")?;
        debug!("Loaded {} default terms.", wordlist.words.len());
        Ok(wordlist)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        let wordlist: Wordlist = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse word list {}", path.display()))?;
        info!("Loaded {} terms from {}.", wordlist.words.len(), path.display());
        Ok(wordlist)
    }
}

fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        None
    } else {
        Some(term)
    }
}

/// Merges the baseline dictionary with the extension and exclusion lists.
///
/// Terms are lowercased and trimmed; the result is sorted and deduplicated so
/// the same inputs always produce the same dictionary.
pub fn merge_words(baseline: &Wordlist, classifier: &ClassifierConfig) -> Vec<String> {
    debug!(
        "merge_words called. Baseline terms: {}, extra: {}, allowed: {}",
        baseline.words.len(),
        classifier.extra_words.len(),
        classifier.allowed_words.len()
    );

    let mut merged: BTreeSet<String> = baseline
        .words
        .iter()
        .chain(classifier.extra_words.iter())
        .filter_map(|w| normalize_term(w))
        .collect();

    for allowed in classifier.allowed_words.iter().filter_map(|w| normalize_term(w)) {
        if !merged.remove(&allowed) {
            warn!("Allowed word '{}' is not in the dictionary.", allowed);
        }
    }

    debug!("Final dictionary size after merge: {}", merged.len());
    merged.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_apart_from_repository() {
        let config = GuestbookConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.validate_repository().is_err());
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let config = GuestbookConfig {
            fetch_count: 0,
            max_body_length: 0,
            marker: "  ".to_string(),
            ..Default::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("fetch_count"));
        assert!(message.contains("max_body_length"));
        assert!(message.contains("marker"));
    }

    #[test]
    fn test_limit_cannot_exceed_fetch_count() {
        let config = GuestbookConfig { fetch_count: 2, limit: 3, ..Default::default() };
        assert!(matches!(config.validate(), Err(GuestbookError::Config(_))));
    }

    #[test]
    fn test_merge_words_extends_and_excludes() {
        let baseline = Wordlist {
            words: vec!["Damn".to_string(), "crap".to_string()],
            ..Default::default()
        };
        let classifier = ClassifierConfig {
            extra_words: vec!["exampleBadWord1".to_string(), " ".to_string(), "damn".to_string()],
            allowed_words: vec!["CRAP".to_string()],
            ..Default::default()
        };
        assert_eq!(merge_words(&baseline, &classifier), vec!["damn", "examplebadword1"]);
    }
}

// guestbook-core/src/pipeline.rs
//! End-to-end guestbook update.
//!
//! fetch -> read document and locate markers -> moderate -> render -> splice -> write.
//!
//! Every step before the write is allowed to fail the run, and the document is
//! only written once the whole entry batch rendered and spliced. The document
//! is checked before moderation, so a missing document or marker aborts the
//! run before any comment is deleted. Removal failures are the one exception:
//! they are counted in the report and the run carries on.

use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::classifier::ProfanityClassifier;
use crate::config::{GuestbookConfig, Wordlist};
use crate::document::DocumentStore;
use crate::errors::GuestbookError;
use crate::model::{Comment, RenderedEntry};
use crate::moderation::{CommentRemover, ModerationEngine};
use crate::render::EntryRenderer;
use crate::sanitizer::TextSanitizer;
use crate::source::CommentSource;
use crate::splice::DocumentSplicer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Compute the updated document but neither remove comments nor write.
    pub dry_run: bool,
}

/// Summary of one update run.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub run_id: String,
    pub fetched: usize,
    pub flagged: usize,
    pub rendered: usize,
    pub removals_succeeded: usize,
    pub removals_failed: usize,
    /// The spliced document differs from the stored one.
    pub changed: bool,
    pub written: bool,
    pub document: String,
}

/// Everything a run needs that does not talk to the outside world.
pub struct GuestbookPipeline {
    config: GuestbookConfig,
    classifier: Arc<ProfanityClassifier>,
    renderer: EntryRenderer,
    splicer: DocumentSplicer,
}

impl GuestbookPipeline {
    /// Validates `config` and builds the classifier from the baseline
    /// dictionary plus the configured extensions.
    pub fn from_config(config: GuestbookConfig) -> Result<Self, GuestbookError> {
        let baseline = config
            .classifier
            .load_baseline()
            .map_err(|e| GuestbookError::Wordlist(format!("{:#}", e)))?;
        Self::with_wordlist(config, &baseline)
    }

    pub fn with_wordlist(config: GuestbookConfig, baseline: &Wordlist) -> Result<Self, GuestbookError> {
        config.validate()?;
        let classifier = Arc::new(ProfanityClassifier::new(baseline, &config.classifier)?);
        let renderer = EntryRenderer::new(
            TextSanitizer::new(config.max_body_length),
            config.avatar_service.clone(),
        );
        let splicer = DocumentSplicer::new(config.marker.clone())?;
        Ok(Self { config, classifier, renderer, splicer })
    }

    pub fn config(&self) -> &GuestbookConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Arc<ProfanityClassifier> {
        &self.classifier
    }

    /// Renders all comments or none.
    pub fn render_entries(&self, comments: &[Comment]) -> Result<Vec<RenderedEntry>, GuestbookError> {
        comments
            .iter()
            .map(|comment| self.renderer.render(comment, &self.classifier))
            .collect()
    }

    pub async fn run(
        &self,
        source: &dyn CommentSource,
        remover: Option<Arc<dyn CommentRemover>>,
        store: &dyn DocumentStore,
        options: UpdateOptions,
    ) -> Result<UpdateReport, GuestbookError> {
        let run_id = Uuid::new_v4().to_string();
        info!("[{}] Starting guestbook update (dry run: {}).", run_id, options.dry_run);

        let comments = source.fetch_recent(self.config.fetch_count).await?;
        let fetched = comments.len();
        info!("[{}] Fetched {} comment(s) from {}.", run_id, fetched, source.name());

        let current = store.read()?;
        let (start, end) = self.splicer.managed_region(&current)?;
        debug!("[{}] Managed region of {} spans bytes {}..{}.", run_id, store.location(), start, end);

        let mut engine = ModerationEngine::new(Arc::clone(&self.classifier), self.config.limit);
        match remover {
            Some(remover) if self.config.remove_flagged && !options.dry_run => {
                debug!("[{}] Flagged comments will be removed via {}.", run_id, remover.name());
                engine = engine.with_remover(remover);
            }
            _ => debug!("[{}] Removal of flagged comments is disabled.", run_id),
        }
        let moderation = engine.moderate(comments).await;

        let entries = self.render_entries(&moderation.clean)?;

        let document = self.splicer.splice(&current, &entries)?;
        let changed = document != current;

        let written = if options.dry_run {
            info!("[{}] Dry run, leaving {} untouched.", run_id, store.location());
            false
        } else if !changed {
            info!("[{}] {} is already up to date.", run_id, store.location());
            false
        } else {
            store.write(&document)?;
            info!("[{}] Wrote {} entr(ies) to {}.", run_id, entries.len(), store.location());
            true
        };

        Ok(UpdateReport {
            run_id,
            fetched,
            flagged: moderation.flagged.len(),
            rendered: entries.len(),
            removals_succeeded: moderation.removals_succeeded(),
            removals_failed: moderation.removals_failed(),
            changed,
            written,
            document,
        })
    }
}

/// One-shot convenience wrapper around [`GuestbookPipeline`].
pub async fn run_update(
    config: GuestbookConfig,
    source: &dyn CommentSource,
    remover: Option<Arc<dyn CommentRemover>>,
    store: &dyn DocumentStore,
    options: UpdateOptions,
) -> Result<UpdateReport, GuestbookError> {
    GuestbookPipeline::from_config(config)?
        .run(source, remover, store, options)
        .await
}

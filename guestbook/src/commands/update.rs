// guestbook/src/commands/update.rs
//! The `update` command: one full guestbook refresh against GitHub.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::io::{self, Write};
use std::sync::Arc;

use guestbook_core::{
    CommentRemover, FileDocument, GitHubClient, GuestbookConfig, GuestbookPipeline,
    UpdateOptions,
};

use crate::cli::UpdateCommand;

/// Layers the command-line flags over `config`.
pub fn apply_overrides(mut config: GuestbookConfig, cmd: &UpdateCommand) -> GuestbookConfig {
    if let Some(document) = &cmd.document {
        config.document = document.clone();
    }
    if let Some(owner) = &cmd.owner {
        config.repository.owner = owner.clone();
    }
    if let Some(repo) = &cmd.repo {
        config.repository.name = repo.clone();
    }
    if let Some(issue) = cmd.issue {
        config.repository.issue_number = issue;
    }
    if let Some(limit) = cmd.limit {
        config.limit = limit;
    }
    if let Some(fetch_count) = cmd.fetch_count {
        config.fetch_count = fetch_count;
    }
    if let Some(api_url) = &cmd.api_url {
        config.api_url = api_url.clone();
    }
    if cmd.no_remove {
        config.remove_flagged = false;
    }
    config
}

pub async fn run_update_command(config: GuestbookConfig, cmd: UpdateCommand) -> Result<()> {
    let config = apply_overrides(config, &cmd);
    config.validate_repository()?;

    let token = match cmd.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => bail!("A GitHub token is required: pass --token or set GITHUB_TOKEN."),
    };

    let pipeline = GuestbookPipeline::from_config(config).context("Invalid configuration")?;
    let config = pipeline.config();
    debug!(
        "Updating {} from {}/{}#{}.",
        config.document.display(),
        config.repository.owner,
        config.repository.name,
        config.repository.issue_number
    );

    let client = Arc::new(GitHubClient::new(
        config.api_url.clone(),
        token,
        config.repository.clone(),
    )?);
    let remover: Arc<dyn CommentRemover> = client.clone();
    let store = FileDocument::new(&config.document);
    let options = UpdateOptions { dry_run: cmd.dry_run };

    let report = pipeline
        .run(client.as_ref(), Some(remover), &store, options)
        .await
        .with_context(|| format!("Failed to update {}", config.document.display()))?;

    if cmd.dry_run {
        let mut stdout = io::stdout().lock();
        stdout.write_all(report.document.as_bytes())?;
        stdout.flush()?;
    }

    info!(
        "Done: {} fetched, {} flagged ({} removed, {} failed), {} shown, document {}.",
        report.fetched,
        report.flagged,
        report.removals_succeeded,
        report.removals_failed,
        report.rendered,
        if report.written { "updated" } else { "unchanged" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_config_values() {
        let cmd = UpdateCommand {
            document: Some(PathBuf::from("PROFILE.md")),
            owner: Some("octocat".to_string()),
            repo: Some("octocat".to_string()),
            issue: Some(7),
            limit: Some(5),
            fetch_count: Some(50),
            no_remove: true,
            ..Default::default()
        };
        let config = apply_overrides(GuestbookConfig::default(), &cmd);

        assert_eq!(config.document, PathBuf::from("PROFILE.md"));
        assert_eq!(config.repository.owner, "octocat");
        assert_eq!(config.repository.issue_number, 7);
        assert_eq!(config.limit, 5);
        assert_eq!(config.fetch_count, 50);
        assert!(!config.remove_flagged);
        assert_eq!(config.api_url, guestbook_core::config::DEFAULT_API_URL);
    }

    #[test]
    fn test_absent_flags_keep_config_values() {
        let mut base = GuestbookConfig::default();
        base.limit = 4;
        base.repository.owner = "from-file".to_string();
        let config = apply_overrides(base.clone(), &UpdateCommand::default());
        assert_eq!(config, base);
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let mut config = GuestbookConfig::default();
        config.repository.owner = "octocat".to_string();
        config.repository.name = "octocat".to_string();
        let err = run_update_command(config, UpdateCommand::default()).await.unwrap_err();
        assert!(err.to_string().contains("token"));
    }
}

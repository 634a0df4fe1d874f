//! Generate command — AI-generated commit message for staged changes.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::warn;

use crate::ai::{CompletionClient, PromptDocument, INSUFFICIENT_CONTEXT_SENTINEL};
use crate::git::{commit_staged, Repo};
use crate::utils::preflight;

/// Placeholder committed when generation fails and `--fallback-commit` was
/// given. Kept fixed so operators can recognize (and later amend) it.
pub const FALLBACK_MESSAGE: &str = "Update code based on recent changes";

/// Generate command options.
#[derive(Parser)]
pub struct GenerateCommand {
    /// Optional free-text guidance folded into the prompt.
    #[arg(value_name = "GUIDANCE")]
    pub guidance: Option<String>,

    /// Generates and displays the message without committing.
    #[arg(long)]
    pub dry_run: bool,

    /// Model to use (defaults to OPENAI_MODEL or gpt-4o).
    #[arg(long)]
    pub model: Option<String>,

    /// Commits with a generic placeholder message when generation fails,
    /// instead of aborting. Off by default so API failures stay visible.
    #[arg(long)]
    pub fallback_commit: bool,
}

/// What to do with the outcome of the generation call.
#[derive(Debug, PartialEq, Eq)]
pub enum MessageResolution {
    /// Use the generated message (display in dry-run, commit otherwise).
    Commit(String),
    /// The model declined with the insufficient-context sentinel: abort
    /// without committing.
    Declined,
    /// Generation produced no result and fallback is not enabled: abort.
    Unavailable,
    /// Generation produced no result; commit with [`FALLBACK_MESSAGE`].
    Fallback,
}

/// Maps the completion result onto the commit decision.
///
/// An absent or empty result means the client failed (it already reported
/// the diagnostic); the sentinel means the model explicitly declined.
pub fn resolve_message(result: Option<String>, allow_fallback: bool) -> MessageResolution {
    match result {
        Some(text) if text == INSUFFICIENT_CONTEXT_SENTINEL => MessageResolution::Declined,
        Some(text) if !text.is_empty() => MessageResolution::Commit(text),
        _ if allow_fallback => MessageResolution::Fallback,
        _ => MessageResolution::Unavailable,
    }
}

impl GenerateCommand {
    /// Executes the generate command against the process working directory.
    pub async fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        self.execute_in(&cwd).await
    }

    /// Executes the generate command against an explicit working directory,
    /// mirroring [`Repo::at`].
    pub async fn execute_in(self, dir: &Path) -> Result<()> {
        let repo = preflight::check_git_repository_at(dir)?;
        let state = repo.collect_state()?;

        // Nothing staged is a no-op, not an error; stop before touching
        // credentials or the network.
        if state.staged_files.is_empty() {
            println!("No staged changes to commit.");
            println!("Tip: use 'git add <file>' to stage changes first.");
            return Ok(());
        }

        if state.diff.trim().is_empty() {
            println!("No changes detected in staged files.");
            return Ok(());
        }

        let credentials = preflight::check_credentials(self.model.as_deref())?;
        println!(
            "✓ Completion API credentials verified (model: {})",
            credentials.model
        );
        println!(
            "Found {} staged file(s) on branch '{}'",
            state.staged_files.len(),
            state.branch
        );

        let prompt = PromptDocument::assemble(&state, self.guidance.as_deref());
        let client = CompletionClient::from_env(self.model.as_deref())?;

        println!("🤖 Generating commit message...");
        let result = match client.complete(&prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("commit message generation failed: {e}");
                eprintln!("warning: commit message generation failed: {e}");
                None
            }
        };

        match resolve_message(result, self.fallback_commit) {
            MessageResolution::Declined => bail!(
                "the model declined to generate a commit message (insufficient context).\n\
                 Re-run with free-text guidance, e.g. git-scribe generate \"summary of the change\""
            ),
            MessageResolution::Unavailable => bail!(
                "commit message generation produced no result; staged changes were left untouched.\n\
                 Re-run with --fallback-commit to commit with a placeholder message"
            ),
            MessageResolution::Fallback => {
                eprintln!("warning: committing with the placeholder message");
                self.finish(&repo, FALLBACK_MESSAGE)
            }
            MessageResolution::Commit(message) => self.finish(&repo, &message),
        }
    }

    /// Displays the message and, unless this is a dry run, commits with it.
    /// The displayed text and the committed text are the same string.
    fn finish(&self, repo: &Repo, message: &str) -> Result<()> {
        println!("Generated commit message:");
        println!("──────────────────────────────────────────────");
        println!("{message}");
        println!("──────────────────────────────────────────────");

        if self.dry_run {
            println!("Dry run: no commit was made.");
            return Ok(());
        }

        commit_staged(repo, message).context("Failed to commit staged changes")?;
        println!("✅ Committed staged changes");

        Ok(())
    }
}

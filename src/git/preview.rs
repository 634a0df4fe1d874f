//! Squash-merge preview of a branch, with optional deletion afterwards.
//!
//! The preview applies the branch's net changes to the working tree without
//! committing, asks the operator whether to delete the branch, and always
//! resets the working tree back to HEAD before acting on the answer.

use tracing::debug;

use crate::git::runner::run_git;
use crate::git::{GitError, Repo};

/// How the squash-merge preview applied to the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The merge applied cleanly.
    Clean,
    /// The merge produced conflicts; conflict markers were left in the
    /// working tree for inspection.
    Conflicts,
}

/// Result of a completed preview run.
#[derive(Debug)]
pub struct PreviewReport {
    /// How the preview merge applied.
    pub outcome: PreviewOutcome,
    /// Whether the branch reference was deleted.
    pub deleted: bool,
}

/// Applies a squash merge of `branch` into the working tree without
/// committing, biased towards the branch's side of any conflict.
///
/// Exit status 1 with git's "Automatic merge failed" notice means conflicts,
/// which is an expected outcome; any other non-zero status is an error.
fn squash_preview(repo: &Repo, branch: &str) -> Result<PreviewOutcome, GitError> {
    let args = [
        "merge",
        "--squash",
        "--no-commit",
        "--strategy-option",
        "theirs",
        branch,
    ];
    let output = run_git(repo.workdir(), &args)?;

    match output.status {
        0 => Ok(PreviewOutcome::Clean),
        1 if output.stdout.contains("Automatic merge failed") => Ok(PreviewOutcome::Conflicts),
        status => Err(GitError::CommandFailed {
            command: args.join(" "),
            status,
            diagnostic: output.diagnostic(),
        }),
    }
}

/// Resets the working tree and index to HEAD.
fn reset_hard(repo: &Repo) -> Result<(), GitError> {
    let output = run_git(repo.workdir(), &["reset", "--hard"])?;
    if output.status != 0 {
        return Err(GitError::CommandFailed {
            command: "reset --hard".to_string(),
            status: output.status,
            diagnostic: output.diagnostic(),
        });
    }
    Ok(())
}

/// Force-deletes the branch reference.
fn delete_branch(repo: &Repo, branch: &str) -> Result<(), GitError> {
    let output = run_git(repo.workdir(), &["branch", "-D", branch])?;
    if output.status != 0 {
        return Err(GitError::CommandFailed {
            command: format!("branch -D {branch}"),
            status: output.status,
            diagnostic: output.diagnostic(),
        });
    }
    Ok(())
}

/// Runs the full preview sequence: squash-merge preview, confirmation,
/// unconditional reset to HEAD, and deletion only if confirmed.
///
/// `confirm` is called with the preview outcome after the merge has been
/// applied to the working tree, so the caller can let the operator inspect
/// the changes before answering. The reset runs regardless of what the
/// preview or the confirmation returned.
pub fn run_preview<F>(repo: &Repo, branch: &str, confirm: F) -> Result<PreviewReport, GitError>
where
    F: FnOnce(PreviewOutcome) -> bool,
{
    let preview = squash_preview(repo, branch);

    let confirmed = match &preview {
        Ok(outcome) => confirm(*outcome),
        Err(_) => false,
    };

    // The working tree was (possibly) modified by the preview merge; restore
    // it before anything else, even when the preview itself failed partway.
    let reset = reset_hard(repo);

    let outcome = preview?;
    reset?;

    debug!(branch, ?outcome, confirmed, "preview finished");

    if !confirmed {
        return Ok(PreviewReport {
            outcome,
            deleted: false,
        });
    }

    delete_branch(repo, branch)?;

    Ok(PreviewReport {
        outcome,
        deleted: true,
    })
}

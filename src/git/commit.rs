//! The one mutating operation of the generator: `git commit`.

use crate::git::runner::run_git_checked;
use crate::git::{GitError, Repo};

/// Commits the staged changes with `message` as the sole commit message.
pub fn commit_staged(repo: &Repo, message: &str) -> Result<(), GitError> {
    run_git_checked(repo.workdir(), &["commit", "-m", message])?;
    Ok(())
}

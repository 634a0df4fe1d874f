//! Thin subprocess wrapper around the `git` executable.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::git::GitError;

/// Captured output of a finished git command.
pub(crate) struct GitOutput {
    /// Exit status code (-1 if terminated by a signal).
    pub status: i32,
    /// Decoded stdout.
    pub stdout: String,
    /// Decoded stderr.
    pub stderr: String,
}

impl GitOutput {
    /// Returns stderr if non-empty, otherwise stdout, trimmed. Git writes
    /// some diagnostics (e.g. merge conflict notices) to stdout.
    pub(crate) fn diagnostic(&self) -> String {
        let text = if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        };
        text.trim().to_string()
    }
}

/// Runs a git command in `dir`, capturing output without judging the exit
/// status. A missing git executable is reported as its own error so callers
/// can distinguish it from "not a repository".
pub(crate) fn run_git(dir: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
    debug!(?args, dir = %dir.display(), "running git command");

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::GitNotInstalled
            } else {
                GitError::Spawn {
                    command: args.join(" "),
                    source: e,
                }
            }
        })?;

    let result = GitOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    debug!(status = result.status, "git command finished");

    Ok(result)
}

/// Runs a git command and requires a zero exit status.
pub(crate) fn run_git_checked(dir: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
    let output = run_git(dir, args)?;

    if output.status != 0 {
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            status: output.status,
            diagnostic: output.diagnostic(),
        });
    }

    Ok(output)
}

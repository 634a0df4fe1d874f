//! Git operations, all performed by shelling out to the `git` executable.

pub mod commit;
pub mod preview;
pub mod repository;

mod runner;

pub use commit::commit_staged;
pub use preview::{run_preview, PreviewOutcome, PreviewReport};
pub use repository::{Repo, RepositoryState};

use thiserror::Error;

/// Errors from invoking git commands.
#[derive(Error, Debug)]
pub enum GitError {
    /// The git executable is not installed or not on PATH.
    #[error("git executable not found. Is git installed and on your PATH?")]
    GitNotInstalled,

    /// The current directory is not inside a git repository.
    #[error("not a git repository. Run this command from within a git repository")]
    NotARepository,

    /// A git command could not be spawned.
    #[error("failed to run `git {command}`: {source}")]
    Spawn {
        /// The git subcommand and arguments that were invoked.
        command: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A git command exited with an unexpected status code.
    #[error("`git {command}` exited with status {status}: {diagnostic}")]
    CommandFailed {
        /// The git subcommand and arguments that were invoked.
        command: String,
        /// The exit status code, or -1 if terminated by a signal.
        status: i32,
        /// Captured stderr (falling back to stdout) from the command.
        diagnostic: String,
    },
}

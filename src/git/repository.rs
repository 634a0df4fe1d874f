//! Repository probing and read-only state collection.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::git::runner::{run_git, run_git_checked};
use crate::git::GitError;

/// Number of recent commit subjects collected as style context.
pub const HISTORY_COMMIT_LIMIT: usize = 25;

/// Branch name used when the current branch cannot be determined
/// (e.g. detached HEAD or an unborn branch in a fresh repository).
pub const UNKNOWN_BRANCH: &str = "unknown-branch";

/// Handle to a git repository rooted at a working directory.
///
/// All operations are thin synchronous shell-outs to the `git` executable;
/// nothing here mutates the working tree or the index.
pub struct Repo {
    workdir: PathBuf,
}

/// Immutable snapshot of the repository facts fed into prompt assembly.
#[derive(Debug, Clone)]
pub struct RepositoryState {
    /// Diff of staged changes (`git diff --cached`).
    pub diff: String,
    /// Paths of staged files; empty means there is nothing to commit.
    pub staged_files: Vec<String>,
    /// Short name of the current branch.
    pub branch: String,
    /// Subjects of recent non-merge commits, newest first.
    pub recent_subjects: Vec<String>,
}

impl Repo {
    /// Probes the current working directory and returns a handle if it is
    /// inside a git repository.
    pub fn discover() -> Result<Self, GitError> {
        let cwd = std::env::current_dir().map_err(|e| GitError::Spawn {
            command: "rev-parse --is-inside-work-tree".to_string(),
            source: e,
        })?;
        Self::at(cwd)
    }

    /// Probes `dir` and returns a handle if it is inside a git repository.
    pub fn at<P: AsRef<Path>>(dir: P) -> Result<Self, GitError> {
        let dir = dir.as_ref().to_path_buf();

        let output = run_git(&dir, &["rev-parse", "--is-inside-work-tree"])?;
        if output.status != 0 {
            return Err(GitError::NotARepository);
        }

        Ok(Self { workdir: dir })
    }

    /// Returns the working directory this handle is pinned to.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Returns the diff of staged changes. Required input; failure is fatal.
    pub fn staged_diff(&self) -> Result<String, GitError> {
        let output = run_git_checked(&self.workdir, &["diff", "--cached"])?;
        Ok(output.stdout)
    }

    /// Returns the list of staged file paths. An empty list is not an error;
    /// it means there is nothing to commit.
    pub fn staged_files(&self) -> Result<Vec<String>, GitError> {
        let output = run_git_checked(&self.workdir, &["diff", "--cached", "--name-only"])?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Returns the short name of the current branch, degrading to
    /// [`UNKNOWN_BRANCH`] with a warning when it cannot be determined.
    pub fn current_branch(&self) -> String {
        match run_git_checked(&self.workdir, &["rev-parse", "--abbrev-ref", "HEAD"]) {
            Ok(output) => output.stdout.trim().to_string(),
            Err(e) => {
                warn!("could not determine current branch: {e}");
                UNKNOWN_BRANCH.to_string()
            }
        }
    }

    /// Returns the subjects of the most recent non-merge commits, newest
    /// first. History is an optional signal: failure (e.g. a repository with
    /// no commits yet) degrades to an empty list with a warning.
    pub fn recent_subjects(&self) -> Vec<String> {
        let count = HISTORY_COMMIT_LIMIT.to_string();
        let args = [
            "log",
            "--no-merges",
            "--pretty=format:%s",
            "-n",
            count.as_str(),
        ];

        match run_git_checked(&self.workdir, &args) {
            Ok(output) => output
                .stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(e) => {
                warn!("could not read commit history: {e}");
                Vec::new()
            }
        }
    }

    /// Collects the full repository snapshot. The diff and the staged file
    /// list are required reads; branch name and history degrade gracefully.
    pub fn collect_state(&self) -> Result<RepositoryState, GitError> {
        let staged_files = self.staged_files()?;
        let diff = self.staged_diff()?;
        let branch = self.current_branch();
        let recent_subjects = self.recent_subjects();

        debug!(
            staged_files = staged_files.len(),
            diff_len = diff.len(),
            branch = %branch,
            history = recent_subjects.len(),
            "collected repository state"
        );

        Ok(RepositoryState {
            diff,
            staged_files,
            branch,
            recent_subjects,
        })
    }
}

//! Shared test fixture: a temporary git repository driven through git2.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use git2::{Repository, Signature};
use tempfile::TempDir;

/// Temporary git repository with helpers for building test histories.
pub struct TestRepo {
    _temp_dir: TempDir,
    pub repo_path: PathBuf,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = temp_dir.path().to_path_buf();

        let repo = Repository::init(&repo_path)?;

        // Configure git user for commits
        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok(TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            repo,
        })
    }

    fn signature() -> Result<Signature<'static>> {
        Ok(Signature::now("Test User", "test@example.com")?)
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
        fs::write(self.repo_path.join(name), content)?;
        Ok(())
    }

    pub fn read_file(&self, name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.repo_path.join(name))?)
    }

    /// Stages a file without committing.
    pub fn stage(&self, name: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(Path::new(name))?;
        index.write()?;
        Ok(())
    }

    /// Writes a file, stages it, and commits it on the current branch.
    pub fn add_commit(&self, message: &str, name: &str, content: &str) -> Result<git2::Oid> {
        self.write_file(name, content)?;

        let mut index = self.repo.index()?;
        index.add_path(Path::new(name))?;
        index.write()?;

        let signature = Self::signature()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let commit_id = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(commit_id)
    }

    /// Creates a branch pointing at the current HEAD.
    pub fn branch_from_head(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.branch(name, &head, false)?;
        Ok(())
    }

    /// Commits a file change onto `branch` without touching the working tree
    /// or the current HEAD.
    pub fn commit_on_branch(
        &self,
        branch: &str,
        message: &str,
        name: &str,
        content: &str,
    ) -> Result<git2::Oid> {
        let branch_ref = self.repo.find_branch(branch, git2::BranchType::Local)?;
        let parent = branch_ref.get().peel_to_commit()?;

        let blob = self.repo.blob(content.as_bytes())?;
        let mut builder = self.repo.treebuilder(Some(&parent.tree()?))?;
        builder.insert(name, blob, 0o100_644)?;
        let tree_id = builder.write()?;
        let tree = self.repo.find_tree(tree_id)?;

        let signature = Self::signature()?;
        let commit_id = self.repo.commit(
            Some(&format!("refs/heads/{branch}")),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(commit_id)
    }

    /// Returns the HEAD commit message.
    pub fn head_message(&self) -> Result<String> {
        let head = self.repo.head()?.peel_to_commit()?;
        Ok(head.message().unwrap_or("").to_string())
    }

    /// Returns true when a local branch with this name exists.
    pub fn branch_exists(&self, name: &str) -> bool {
        self.repo.find_branch(name, git2::BranchType::Local).is_ok()
    }

    /// Returns true when the working tree and index have no changes
    /// (untracked files included).
    pub fn worktree_clean(&self) -> Result<bool> {
        let mut options = git2::StatusOptions::new();
        options.include_untracked(true);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }
}

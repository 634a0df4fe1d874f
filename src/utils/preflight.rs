//! Preflight validation checks for early failure detection
//!
//! This module provides functions to validate required services and
//! credentials before starting expensive operations. Commands should call
//! these checks early to fail fast with clear error messages.

use std::path::Path;

use anyhow::Result;

use crate::git::Repo;
use crate::utils::settings::Settings;

/// Result of completion credential validation.
#[derive(Debug)]
pub struct CredentialInfo {
    /// The model that will be used.
    pub model: String,
}

/// Validates that a completion API credential is available.
///
/// This performs a lightweight check of environment variables (with
/// settings-file fallback) without creating a client and without any network
/// access. Use this before prompt assembly to fail fast if credentials are
/// missing.
pub fn check_credentials(model_override: Option<&str>) -> Result<CredentialInfo> {
    let settings = Settings::load();

    if settings.api_key().is_none() {
        anyhow::bail!(
            "OpenAI API key not found.\n\
             Set one of these environment variables:\n\
             - OPENAI_API_KEY\n\
             - OPENAI_AUTH_TOKEN"
        );
    }

    Ok(CredentialInfo {
        model: settings.model(model_override),
    })
}

/// Validates we're in a valid git repository and returns a handle to it.
///
/// Distinguishes a missing `git` executable from "not a repository"; both
/// are fatal, with different diagnostics.
pub fn check_git_repository() -> Result<Repo> {
    let repo = Repo::discover()?;
    Ok(repo)
}

/// Same validation against an explicit directory instead of the process
/// working directory.
pub fn check_git_repository_at<P: AsRef<Path>>(dir: P) -> Result<Repo> {
    let repo = Repo::at(dir)?;
    Ok(repo)
}

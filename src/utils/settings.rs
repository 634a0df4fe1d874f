//! Credential and model resolution.
//!
//! The generator needs exactly two things from its environment: a completion
//! API key and (optionally) a model name. Both are read from the process
//! environment first, falling back to the `env` map in
//! $HOME/.git-scribe/settings.json so keys can live outside shell profiles.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::ai::client::DEFAULT_MODEL;

/// Environment variables accepted as the completion API credential, in
/// order of preference.
pub const API_KEY_VARS: &[&str] = &["OPENAI_API_KEY", "OPENAI_AUTH_TOKEN"];

/// Environment variable selecting the model when `--model` is not given.
pub const MODEL_VAR: &str = "OPENAI_MODEL";

/// Fallback values loaded from $HOME/.git-scribe/settings.json.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location. A missing home directory or
    /// settings file simply means there are no fallback values; a file that
    /// exists but cannot be parsed is reported as a warning and skipped.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring settings file {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    fn settings_path() -> Option<PathBuf> {
        Some(dirs::home_dir()?.join(".git-scribe").join("settings.json"))
    }

    /// Process environment first, settings file second.
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.env.get(key).cloned())
    }

    /// Returns the completion API key, if one is configured anywhere.
    pub fn api_key(&self) -> Option<String> {
        API_KEY_VARS.iter().find_map(|key| self.lookup(key))
    }

    /// Returns the model to request: the explicit override wins, then
    /// [`MODEL_VAR`], then the built-in default.
    pub fn model(&self, model_override: Option<&str>) -> String {
        model_override
            .map(String::from)
            .or_else(|| self.lookup(MODEL_VAR))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings_from(json: &str) -> Settings {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, json).unwrap();
        Settings::load_from_path(&path).unwrap()
    }

    #[test]
    fn missing_file_yields_no_values() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(temp_dir.path().join("absent.json")).unwrap();
        assert!(settings.env.is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(Settings::load_from_path(&path).is_err());
    }

    // Single test because the cases share the process environment.
    #[test]
    fn api_key_resolution_order() {
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("OPENAI_AUTH_TOKEN");

        let settings = settings_from(r#"{"env": {"OPENAI_API_KEY": "file-key"}}"#);
        assert_eq!(settings.api_key().unwrap(), "file-key");

        env::set_var("OPENAI_API_KEY", "env-key");
        assert_eq!(settings.api_key().unwrap(), "env-key");
        env::remove_var("OPENAI_API_KEY");

        let token_only = settings_from(r#"{"env": {"OPENAI_AUTH_TOKEN": "token-from-file"}}"#);
        assert_eq!(token_only.api_key().unwrap(), "token-from-file");

        let empty = settings_from(r#"{"env": {}}"#);
        assert!(empty.api_key().is_none());
    }

    #[test]
    fn model_resolution_order() {
        let settings = settings_from(r#"{"env": {"OPENAI_MODEL": "file-model"}}"#);

        env::remove_var("OPENAI_MODEL");
        assert_eq!(settings.model(Some("cli-model")), "cli-model");
        assert_eq!(settings.model(None), "file-model");

        env::set_var("OPENAI_MODEL", "env-model");
        assert_eq!(settings.model(None), "env-model");
        env::remove_var("OPENAI_MODEL");

        let empty = settings_from(r#"{"env": {}}"#);
        assert_eq!(empty.model(None), DEFAULT_MODEL);
    }
}

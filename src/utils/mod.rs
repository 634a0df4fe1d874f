//! Utility functions and helpers.

pub mod preflight;
pub mod settings;

pub use preflight::{check_credentials, check_git_repository};

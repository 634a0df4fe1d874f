//! # git-scribe
//!
//! AI-assisted Git tooling: generate a commit message for staged changes by
//! asking a chat-completion API, and preview a squash merge of a branch
//! before optionally deleting it.
//!
//! ## Quick Start
//!
//! ```rust
//! use git_scribe::*;
//!
//! println!("git-scribe {VERSION}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ai;
pub mod cli;
pub mod git;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of git-scribe.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

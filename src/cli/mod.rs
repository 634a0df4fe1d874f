//! CLI interface for git-scribe

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod generate;
pub mod preview;

pub use generate::GenerateCommand;
pub use preview::PreviewCommand;

/// git-scribe: AI-assisted commit messages and branch previews
#[derive(Parser)]
#[command(name = "git-scribe")]
#[command(about = "AI-assisted commit messages and branch previews", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories
#[derive(Subcommand)]
pub enum Commands {
    /// Generates a commit message for staged changes and commits with it.
    Generate(GenerateCommand),
    /// Previews a squash merge of a branch and optionally deletes it.
    Preview(PreviewCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate(generate_cmd) => generate_cmd.execute().await,
            Commands::Preview(preview_cmd) => preview_cmd.execute(),
        }
    }
}

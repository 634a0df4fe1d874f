//! Preview command — squash-merge preview of a branch with optional deletion.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use crate::git::{run_preview, PreviewOutcome};
use crate::utils::preflight;

/// Preview command options.
#[derive(Parser)]
pub struct PreviewCommand {
    /// Branch to preview and potentially delete.
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

impl PreviewCommand {
    /// Executes the preview command.
    pub fn execute(self) -> Result<()> {
        let repo = preflight::check_git_repository()?;

        println!(
            "Previewing branch '{}' by applying a squash merge...",
            self.branch
        );
        println!("This will modify your working directory; inspect with 'git status' or 'git diff'.");

        let question = format!(
            "Delete branch '{}' after reviewing the preview? (y/n): ",
            self.branch
        );
        let report = run_preview(&repo, &self.branch, |outcome| {
            match outcome {
                PreviewOutcome::Clean => {
                    println!("Preview applied cleanly to the working directory.");
                }
                PreviewOutcome::Conflicts => {
                    println!("Preview produced merge conflicts; inspect them in the working directory.");
                }
            }
            confirm(&question).unwrap_or(false)
        })?;

        println!("Working directory reset to HEAD.");

        if report.deleted {
            println!("✅ Branch '{}' deleted", self.branch);
        } else {
            println!("Branch deletion cancelled.");
        }

        Ok(())
    }
}

/// Prints a prompt and reads a y/n answer from stdin.
fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

use std::process;

use clap::Parser;
use git_scribe::Cli;

#[tokio::main]
async fn main() {
    // Logging goes to stderr, filtered by RUST_LOG (warn when unset), so the
    // generated commit message on stdout stays clean for piping.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e}");

        // Walk the chain so git/API diagnostics reach the user
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {err}");
            source = err.source();
        }

        process::exit(1);
    }
}

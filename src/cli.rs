// src/cli.rs
use clap::Parser;

/// Command-line arguments for newswatch.
///
/// Both options override the saved configuration for this run; the topic is
/// also persisted on a clean exit, the same as editing it inside the app.
#[derive(Parser, Debug)]
#[command(author, version, about = "Live news tracker dashboard for the terminal")]
pub struct Cli {
    /// Topic to track (e.g. "AI", "elections", "spaceX")
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Fetch and render once instead of refreshing every 5 minutes
    #[arg(long)]
    pub no_refresh: bool,
}

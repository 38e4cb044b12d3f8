//! CLI interface using clap.
//!
//! Provides the command-line flags for the tool. The flags are independent
//! and may combine; passing none performs no work.

use std::path::PathBuf;

use clap::Parser;

/// Export Slack starred items to CSV and bulk-delete conversation messages.
#[derive(Parser, Debug)]
#[command(name = "slack-stars")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Dump every processed starred item to item-dump.md.
    #[arg(long)]
    pub debug: bool,

    /// Export the authenticated user's starred items to CSV.
    #[arg(long)]
    pub get_starred: bool,

    /// Delete every message in the conversation given by --channel.
    #[arg(long)]
    pub del_msg: bool,

    /// Conversation to purge (required with --del-msg).
    #[arg(long, required_if_eq("del_msg", "true"))]
    pub channel: Option<String>,

    /// Path to the YAML file holding the API token.
    #[arg(long, default_value = "token.yml")]
    pub config: PathBuf,

    /// Path of the CSV export.
    #[arg(long, default_value = "starred.csv")]
    pub output: PathBuf,
}

//! slack-stars - Export Slack starred items and clean up conversations.
//!
//! This tool talks to the Slack Web API to export the authenticated user's
//! starred items into a spreadsheet-friendly CSV, and to bulk-delete every
//! message in a chosen conversation.
//!
//! Quick start:
//!   slack-stars --get-starred                    # starred items -> starred.csv
//!   slack-stars --get-starred --debug            # also dump raw items to item-dump.md
//!   slack-stars --del-msg --channel D024BE91L    # purge one conversation
//!
//! The API token is read from token.yml in the working directory (override
//! with --config).

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{delete_channel_history, export_starred};
use cli::Cli;
use infrastructure::{load_token, write_records, DumpWriter, SlackClient};

/// Debug dump target in the working directory.
const DUMP_FILE: &str = "item-dump.md";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
///
/// Startup failures (malformed config) propagate and exit nonzero; failures
/// of an individual command are logged and the other requested command still
/// runs, leaving the exit status untouched.
async fn run(cli: Cli) -> domain::Result<()> {
    if !cli.get_starred && !cli.del_msg {
        tracing::info!("Nothing to do; pass --get-starred and/or --del-msg");
        return Ok(());
    }

    let token = load_token(&cli.config)?;
    let client = SlackClient::new(token);

    if cli.get_starred {
        if let Err(e) = cmd_get_starred(&client, cli.debug, &cli.output).await {
            tracing::error!("Export failed: {e}");
        }
    }

    if cli.del_msg {
        // clap guarantees --channel is present alongside --del-msg.
        if let Some(channel) = cli.channel.as_deref() {
            if let Err(e) = cmd_del_messages(&client, channel).await {
                tracing::error!("Purge failed: {e}");
            }
        }
    }

    Ok(())
}

/// Export starred items to CSV, optionally dumping raw items.
async fn cmd_get_starred(
    client: &SlackClient,
    debug: bool,
    output: &Path,
) -> domain::Result<()> {
    let items = client.list_starred().await?;
    println!("{} starred items", items.len());

    let dump = if debug {
        match DumpWriter::create(Path::new(DUMP_FILE)) {
            Ok(writer) => Some(writer),
            Err(e) => {
                // Dumping is disabled for this run rather than silently no-oped.
                tracing::warn!("Debug dump disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    let outcome = export_starred(items, client.clone(), dump).await;

    tracing::info!(
        total = outcome.stats.total(),
        messages = outcome.stats.messages,
        files = outcome.stats.files,
        file_comments = outcome.stats.file_comments,
        channel_refs = outcome.stats.channel_refs,
        other = outcome.stats.other,
        unresolved_users = outcome.stats.unresolved_users,
        "Export finished"
    );

    write_records(output, &outcome.records)?;
    println!(
        "{} Exported {} starred items to {}",
        "✓".green().bold(),
        outcome.records.len(),
        output.display()
    );

    Ok(())
}

/// Delete every message in one conversation.
async fn cmd_del_messages(client: &SlackClient, channel: &str) -> domain::Result<()> {
    let stats = delete_channel_history(client, channel).await?;

    println!(
        "{} Deleted {}/{} messages from {}",
        "✓".green().bold(),
        stats.deleted,
        stats.attempted,
        channel
    );
    if stats.failed > 0 {
        println!(
            "  {} {} deletion(s) failed, see log",
            "!".yellow().bold(),
            stats.failed
        );
    }

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

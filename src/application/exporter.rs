//! Starred-item export service.
//!
//! The core of the tool: a background task walks the starred items
//! oldest-first, classifies each into an export record, optionally dumps the
//! raw item, and reports progress to the consuming loop over two channels —
//! one progress value per item, then a single completion event.

use std::io::Write;

use chrono::DateTime;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{ExportRecord, ExportStats, ItemKind, StarredItem, StarredMessage, UserLookup};
use crate::infrastructure::DumpWriter;

/// Records and counters produced by one export run.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    /// Ordered oldest-first; the index field inside each record keeps the
    /// item's original newest-first position.
    pub records: Vec<ExportRecord>,
    pub stats: ExportStats,
}

/// Everything the worker hands back through the completion channel. The dump
/// writer rides along so the consumer finalizes it only after completion.
struct Completed {
    records: Vec<ExportRecord>,
    stats: ExportStats,
    dump: Option<DumpWriter>,
}

/// Export the given starred items (API order, newest-first).
///
/// Processing happens on a spawned task; this function is the consuming
/// loop, printing `\r<percent> percent` per progress value and returning the
/// accumulated records once the completion event arrives. Per-item failures
/// (user lookup, dump writes) are logged and never abort the run.
pub async fn export_starred<L>(
    items: Vec<StarredItem>,
    lookup: L,
    dump: Option<DumpWriter>,
) -> ExportOutcome
where
    L: UserLookup + 'static,
{
    let total = items.len();
    let (mut progress_rx, mut done_rx) = spawn_worker(items, lookup, dump);

    loop {
        tokio::select! {
            // Drain pending progress first so completion is observed
            // strictly after the last progress value.
            biased;
            Some(index) = progress_rx.recv() => {
                print!("\r{} percent", index * 100 / total);
                let _ = std::io::stdout().flush();
            }
            completed = &mut done_rx => {
                if total > 0 {
                    println!();
                }
                match completed {
                    Ok(Completed { records, stats, dump }) => {
                        if let Some(writer) = dump {
                            finish_dump(writer);
                        }
                        return ExportOutcome { records, stats };
                    }
                    Err(_) => {
                        tracing::error!("Export worker terminated without completing");
                        return ExportOutcome::default();
                    }
                }
            }
        }
    }
}

/// Spawn the producer task.
///
/// The progress channel has capacity 1: a rendezvous per item, so the worker
/// cannot signal completion before every progress value has been made
/// available for receipt. The completion channel fires exactly once, after
/// the loop.
fn spawn_worker<L>(
    items: Vec<StarredItem>,
    lookup: L,
    mut dump: Option<DumpWriter>,
) -> (mpsc::Receiver<usize>, oneshot::Receiver<Completed>)
where
    L: UserLookup + 'static,
{
    let (progress_tx, progress_rx) = mpsc::channel::<usize>(1);
    let (done_tx, done_rx) = oneshot::channel::<Completed>();

    tokio::spawn(async move {
        let mut records = Vec::with_capacity(items.len());
        let mut stats = ExportStats::default();

        // Stars arrive newest-first; walk in reverse for chronological output.
        for (index, item) in items.iter().enumerate().rev() {
            let record = build_record(index, item, &lookup, &mut stats).await;

            if progress_tx.send(index).await.is_err() {
                tracing::debug!("Progress receiver dropped");
            }

            records.push(record);

            if let Some(writer) = dump.as_mut() {
                if let Err(e) = writer.write_item(index, item) {
                    tracing::warn!("Dump write failed: {e}");
                }
            }
        }

        if done_tx
            .send(Completed {
                records,
                stats,
                dump,
            })
            .is_err()
        {
            tracing::debug!("Completion receiver dropped");
        }
    });

    (progress_rx, done_rx)
}

/// Classify one item into its export record.
async fn build_record<L: UserLookup>(
    index: usize,
    item: &StarredItem,
    lookup: &L,
    stats: &mut ExportStats,
) -> ExportRecord {
    let mut user = String::new();
    let mut timestamp = String::new();

    match item.kind {
        ItemKind::Message => {
            stats.messages += 1;
            if let Some(msg) = &item.message {
                match lookup.display_name(&msg.user).await {
                    Ok(name) => user = name,
                    Err(e) => {
                        stats.unresolved_users += 1;
                        tracing::debug!(user = %msg.user, "User lookup failed: {e}");
                    }
                }
                timestamp = format_slack_ts(&msg.ts).unwrap_or_default();
            }
        }
        ItemKind::File => stats.files += 1,
        ItemKind::FileComment => stats.file_comments += 1,
        ItemKind::Channel | ItemKind::Im | ItemKind::Group => stats.channel_refs += 1,
        ItemKind::Unknown => stats.other += 1,
    }

    tracing::trace!(index, kind = %item.kind, "Classified item");

    ExportRecord {
        index: index.to_string(),
        timestamp,
        user,
        description: describe_item(item),
    }
}

/// Resolve the description column for one item. Unknown kinds resolve to an
/// empty description, silently.
fn describe_item(item: &StarredItem) -> String {
    match item.kind {
        ItemKind::Message => item.message.as_ref().map_or_else(String::new, describe_message),
        ItemKind::File => item
            .file
            .as_ref()
            .map(|f| f.url_private_download.clone())
            .unwrap_or_default(),
        ItemKind::FileComment => {
            let name = item.file.as_ref().map_or("", |f| f.name.as_str());
            let comment = item.comment.as_ref().map_or("", |c| c.comment.as_str());
            format!("{name} - {comment}")
        }
        ItemKind::Channel | ItemKind::Im | ItemKind::Group => {
            item.channel.clone().unwrap_or_default()
        }
        ItemKind::Unknown => String::new(),
    }
}

/// Message text; if empty and no files, all attachment texts newline-joined;
/// if still empty and files exist, all private file URLs newline-joined.
fn describe_message(msg: &StarredMessage) -> String {
    let mut desc = msg.text.clone();

    if desc.is_empty() && msg.files.is_empty() {
        for attachment in &msg.attachments {
            desc.push_str(&attachment.text);
            desc.push('\n');
        }
    }
    if desc.is_empty() && !msg.files.is_empty() {
        for file in &msg.files {
            desc.push_str(&file.url_private);
            desc.push('\n');
        }
    }

    desc
}

/// Parse a Slack fractional-seconds timestamp string into
/// `YYYY-MM-DD HH:MM:SS` (UTC, whole seconds). `None` if unparseable.
fn format_slack_ts(ts: &str) -> Option<String> {
    let seconds = ts.parse::<f64>().ok()?;
    let dt = DateTime::from_timestamp(seconds.trunc() as i64, 0)?;
    Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Finalize the dump file after completion; failures are logged, not fatal.
fn finish_dump(writer: DumpWriter) {
    use colored::Colorize;

    match writer.finish() {
        Ok(()) => println!("{} Debug dump written", "✓".green().bold()),
        Err(e) => tracing::warn!("Failed to close dump file: {e}"),
    }
}

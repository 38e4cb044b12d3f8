//! Domain models for Slack starred items and export output.
//!
//! These models represent the entities consumed from the Slack Web API
//! and the records produced for the CSV export.

use serde::{Deserialize, Serialize};

/// Kind of a starred item as reported by `stars.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A starred message in a channel or DM.
    Message,
    /// A starred uploaded file.
    File,
    /// A starred comment on a file.
    FileComment,
    /// A starred public channel.
    Channel,
    /// A starred direct-message conversation.
    Im,
    /// A starred private group.
    Group,
    /// Any kind this tool does not know about.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::File => write!(f, "file"),
            Self::FileComment => write!(f, "file_comment"),
            Self::Channel => write!(f, "channel"),
            Self::Im => write!(f, "im"),
            Self::Group => write!(f, "group"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A message attachment; only the text is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub text: String,
}

/// An uploaded file referenced by a starred item or message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url_private: String,
    #[serde(default)]
    pub url_private_download: String,
}

/// A comment on a file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileComment {
    #[serde(default)]
    pub comment: String,
}

/// The message payload of a starred item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StarredMessage {
    /// Posting user's identifier (resolved to a display name later).
    #[serde(default)]
    pub user: String,
    /// Message text; may be empty for attachment- or file-only messages.
    #[serde(default)]
    pub text: String,
    /// Slack timestamp string with fractional seconds, e.g. `"1503435957.000237"`.
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub files: Vec<FileObject>,
}

/// One starred item from `stars.list`.
///
/// The payload fields are kind-specific; absent ones deserialize to `None`.
/// Read-only to the exporter once fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct StarredItem {
    /// Item kind, drives classification.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Raw channel identifier for channel/im/group references (and messages).
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub message: Option<StarredMessage>,
    #[serde(default)]
    pub file: Option<FileObject>,
    #[serde(default)]
    pub comment: Option<FileComment>,
}

/// A user as returned by `users.info`; only the display name is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
}

/// A message in a conversation history page; only the timestamp is needed
/// to address it for deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    pub ts: String,
}

/// One page of conversation history plus the continuation cursor, if any.
#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub messages: Vec<HistoryMessage>,
    /// Cursor for the next page; `None` once the history is exhausted.
    pub next_cursor: Option<String>,
}

/// One row of the CSV export, one-to-one with the starred items.
///
/// Field order is the column order. The index is the item's position in the
/// original (newest-first) API ordering, not its processing rank; fields the
/// exporter failed to enrich stay empty rather than dropping the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub index: String,
    pub timestamp: String,
    pub user: String,
    pub description: String,
}

/// Summary counters for one export run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportStats {
    /// Starred messages processed.
    pub messages: usize,
    /// Starred files processed.
    pub files: usize,
    /// Starred file comments processed.
    pub file_comments: usize,
    /// Starred channel/im/group references processed.
    pub channel_refs: usize,
    /// Items of a kind this tool does not classify.
    pub other: usize,
    /// Message items whose user lookup failed (blank name in the record).
    pub unresolved_users: usize,
}

impl ExportStats {
    /// Total items processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.messages + self.files + self.file_comments + self.channel_refs + self.other
    }
}

/// Summary counters for one delete run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteStats {
    /// Messages a deletion was attempted for.
    pub attempted: usize,
    /// Successful deletions.
    pub deleted: usize,
    /// Failed deletions (logged, never aborting the batch).
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starred_message_item_parses() {
        let json = r#"{
            "type": "message",
            "channel": "C025GUBAX",
            "message": {
                "user": "U024BE7LH",
                "text": "hello",
                "ts": "1503435957.000237",
                "attachments": [{"text": "att"}]
            }
        }"#;

        let item: StarredItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::Message);
        let msg = item.message.unwrap();
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.attachments.len(), 1);
        assert!(msg.files.is_empty());
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let item: StarredItem = serde_json::from_str(r#"{"type": "something_new"}"#).unwrap();
        assert_eq!(item.kind, ItemKind::Unknown);
        assert!(item.message.is_none());
    }

    #[test]
    fn test_file_item_parses_with_defaults() {
        let json = r#"{
            "type": "file",
            "file": {"name": "report.pdf", "url_private_download": "https://x/report.pdf"}
        }"#;

        let item: StarredItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::File);
        let file = item.file.unwrap();
        assert_eq!(file.url_private_download, "https://x/report.pdf");
        assert!(file.url_private.is_empty());
    }

    #[test]
    fn test_export_stats_total() {
        let stats = ExportStats {
            messages: 2,
            files: 1,
            file_comments: 1,
            channel_refs: 3,
            other: 1,
            unresolved_users: 2,
        };
        assert_eq!(stats.total(), 8);
    }
}

//! Seams over the chat-platform API consumed by the application services.
//!
//! The HTTP client implements both traits; tests substitute in-memory fakes
//! so the worker loops run without a network.

use async_trait::async_trait;

use super::error::Result;
use super::models::HistoryPage;

/// Resolves a user identifier to a display name.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Look up the display name for `user_id`.
    async fn display_name(&self, user_id: &str) -> Result<String>;
}

/// Conversation history access and message deletion.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Fetch one page of history for `channel`, following `cursor` when given.
    async fn history_page(&self, channel: &str, cursor: Option<&str>) -> Result<HistoryPage>;

    /// Delete a single message addressed by channel and timestamp.
    async fn delete_message(&self, channel: &str, ts: &str) -> Result<()>;
}

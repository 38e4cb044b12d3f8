//! Conversation purge service.
//!
//! Walks a channel's full history via continuation cursors and deletes every
//! message, logging per-message failures without aborting the batch.

use crate::domain::{ConversationApi, DeleteStats, Result};

/// Delete every message in `channel`.
///
/// Pages are fetched until the continuation cursor runs out; each message in
/// a page gets one deletion attempt, and the running index is reported after
/// every attempt. A failed deletion is counted and logged, never fatal.
///
/// # Errors
/// Returns error if a history page cannot be fetched.
pub async fn delete_channel_history<A>(api: &A, channel: &str) -> Result<DeleteStats>
where
    A: ConversationApi,
{
    let mut stats = DeleteStats::default();
    let mut cursor: Option<String> = None;

    loop {
        let page = api.history_page(channel, cursor.as_deref()).await?;

        for msg in &page.messages {
            let index = stats.attempted;
            stats.attempted += 1;

            match api.delete_message(channel, &msg.ts).await {
                Ok(()) => stats.deleted += 1,
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!(ts = %msg.ts, "Failed to delete message: {e}");
                }
            }
            tracing::info!(index, "Delete attempted");
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::info!(
        attempted = stats.attempted,
        deleted = stats.deleted,
        failed = stats.failed,
        "Purge completed"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::{AppError, HistoryMessage, HistoryPage};

    struct FakeApi {
        pages: Mutex<VecDeque<HistoryPage>>,
        cursors_seen: Mutex<Vec<Option<String>>>,
        deleted: Mutex<Vec<String>>,
        fail_ts: Option<String>,
    }

    impl FakeApi {
        fn new(pages: Vec<HistoryPage>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                cursors_seen: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
                fail_ts: None,
            }
        }

        fn failing_on(mut self, ts: &str) -> Self {
            self.fail_ts = Some(ts.to_string());
            self
        }
    }

    #[async_trait]
    impl ConversationApi for FakeApi {
        async fn history_page(&self, _channel: &str, cursor: Option<&str>) -> Result<HistoryPage> {
            self.cursors_seen
                .lock()
                .unwrap()
                .push(cursor.map(String::from));
            Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
        }

        async fn delete_message(&self, _channel: &str, ts: &str) -> Result<()> {
            if self.fail_ts.as_deref() == Some(ts) {
                return Err(AppError::slack("chat.delete", "cant_delete_message"));
            }
            self.deleted.lock().unwrap().push(ts.to_string());
            Ok(())
        }
    }

    fn page(ts_list: &[&str], next_cursor: Option<&str>) -> HistoryPage {
        HistoryPage {
            messages: ts_list
                .iter()
                .map(|ts| HistoryMessage {
                    ts: (*ts).to_string(),
                })
                .collect(),
            next_cursor: next_cursor.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_deletes_across_pages_following_cursor() {
        let api = FakeApi::new(vec![
            page(&["3.0", "2.0"], Some("c1")),
            page(&["1.0"], None),
        ]);

        let stats = delete_channel_history(&api, "D123").await.unwrap();

        assert_eq!(stats.attempted, 3);
        assert_eq!(stats.deleted, 3);
        assert_eq!(stats.failed, 0);
        assert_eq!(
            *api.deleted.lock().unwrap(),
            vec!["3.0".to_string(), "2.0".to_string(), "1.0".to_string()]
        );
        assert_eq!(
            *api.cursors_seen.lock().unwrap(),
            vec![None, Some("c1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_abort_batch() {
        let api = FakeApi::new(vec![page(&["3.0", "2.0", "1.0"], None)]).failing_on("2.0");

        let stats = delete_channel_history(&api, "D123").await.unwrap();

        assert_eq!(stats.attempted, 3);
        assert_eq!(stats.deleted, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(
            *api.deleted.lock().unwrap(),
            vec!["3.0".to_string(), "1.0".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_history_is_a_noop() {
        let api = FakeApi::new(vec![page(&[], None)]);

        let stats = delete_channel_history(&api, "D123").await.unwrap();

        assert_eq!(stats.attempted, 0);
        assert_eq!(stats.deleted, 0);
        assert!(api.deleted.lock().unwrap().is_empty());
    }
}

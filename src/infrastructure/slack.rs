//! Slack Web API client.
//!
//! Thin bearer-auth wrapper over `reqwest` covering the four methods this
//! tool uses: `stars.list`, `users.info`, `conversations.history`, and
//! `chat.delete`. Every response is checked for HTTP status and the Slack
//! `{ok, error}` envelope.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{
    AppError, ConversationApi, HistoryMessage, HistoryPage, Result, StarredItem, UserLookup,
    UserProfile,
};

const SLACK_API_BASE: &str = "https://slack.com/api";

/// Items requested per `stars.list` page.
const STARS_PAGE_SIZE: &str = "100";

/// Client for the Slack Web API.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
}

impl SlackClient {
    /// Create a client using `token` as the bearer credential.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
        }
    }

    /// List all starred items, following the classic `page`/`pages` paging
    /// until exhausted. Items arrive newest-first.
    ///
    /// # Errors
    /// Returns error on transport failure or a Slack-side error.
    pub async fn list_starred(&self) -> Result<Vec<StarredItem>> {
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let page_param = page.to_string();
            let resp: StarsListResponse = self
                .get(
                    "stars.list",
                    &[("page", page_param.as_str()), ("count", STARS_PAGE_SIZE)],
                )
                .await?;
            ensure_ok("stars.list", resp.ok, resp.error)?;

            items.extend(resp.items);

            let pages = resp.paging.map_or(1, |p| p.pages);
            if page >= pages {
                break;
            }
            page += 1;
        }

        tracing::debug!(count = items.len(), "Fetched starred items");
        Ok(items)
    }

    /// Fetch a user by identifier.
    ///
    /// # Errors
    /// Returns error on transport failure or a Slack-side error.
    pub async fn user_info(&self, user_id: &str) -> Result<UserProfile> {
        let resp: UserInfoResponse = self.get("users.info", &[("user", user_id)]).await?;
        ensure_ok("users.info", resp.ok, resp.error)?;

        resp.user
            .ok_or_else(|| AppError::slack("users.info", "missing user payload"))
    }

    /// Fetch one page of conversation history for `channel`.
    ///
    /// # Errors
    /// Returns error on transport failure or a Slack-side error.
    pub async fn conversation_history(
        &self,
        channel: &str,
        cursor: Option<&str>,
    ) -> Result<HistoryPage> {
        let mut query = vec![("channel", channel)];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        let resp: HistoryResponse = self.get("conversations.history", &query).await?;
        ensure_ok("conversations.history", resp.ok, resp.error)?;

        let next_cursor = resp
            .response_metadata
            .map(|m| m.next_cursor)
            .filter(|c| !c.is_empty());

        Ok(HistoryPage {
            messages: resp.messages,
            next_cursor,
        })
    }

    /// Delete one message addressed by channel and timestamp.
    ///
    /// # Errors
    /// Returns error on transport failure or a Slack-side error.
    pub async fn delete(&self, channel: &str, ts: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{SLACK_API_BASE}/chat.delete"))
            .bearer_auth(&self.token)
            .form(&[("channel", channel), ("ts", ts)])
            .send()
            .await
            .map_err(AppError::api)?;

        let resp: ApiEnvelope = check_status("chat.delete", response)
            .await?
            .json()
            .await
            .map_err(AppError::api)?;

        ensure_ok("chat.delete", resp.ok, resp.error)
    }

    /// GET a Slack method and deserialize its JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        method: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .http
            .get(format!("{SLACK_API_BASE}/{method}"))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(AppError::api)?;

        check_status(method, response)
            .await?
            .json()
            .await
            .map_err(AppError::api)
    }
}

#[async_trait]
impl UserLookup for SlackClient {
    async fn display_name(&self, user_id: &str) -> Result<String> {
        Ok(self.user_info(user_id).await?.name)
    }
}

#[async_trait]
impl ConversationApi for SlackClient {
    async fn history_page(&self, channel: &str, cursor: Option<&str>) -> Result<HistoryPage> {
        self.conversation_history(channel, cursor).await
    }

    async fn delete_message(&self, channel: &str, ts: &str) -> Result<()> {
        self.delete(channel, ts).await
    }
}

/// Fail on non-success HTTP status before touching the body.
async fn check_status(method: &'static str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(AppError::Api {
        message: format!("{method} returned HTTP {status}"),
        source: None,
    })
}

/// Map an `ok: false` envelope to a typed error.
fn ensure_ok(method: &'static str, ok: bool, error: Option<String>) -> Result<()> {
    if ok {
        return Ok(());
    }
    Err(AppError::slack(
        method,
        error.unwrap_or_else(|| "unknown_error".into()),
    ))
}

// -- Slack response types (private, only model what we need) --

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StarsListResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    items: Vec<StarredItem>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(default)]
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<HistoryMessage>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

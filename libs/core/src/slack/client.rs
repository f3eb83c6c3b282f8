use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::Instrument;

use crate::slack::message::PostMessageRequest;

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

const POST_MESSAGE: &str = "chat.postMessage";
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("slack transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("slack returned status {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("slack response decode error: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("An API error occurred: {error}")]
    Api { error: String },
    #[error("slack response is missing the message ts")]
    MissingTimestamp,
}

/// A message Slack accepted.
#[derive(Clone, Debug, Default)]
pub struct PostedMessage {
    pub ts: String,
    pub channel: Option<String>,
}

#[async_trait]
pub trait MessagePoster: Send + Sync {
    async fn post_message(&self, request: &PostMessageRequest)
    -> Result<PostedMessage, SlackError>;
}

#[derive(Debug, Deserialize)]
struct RawPostMessageResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Bot-token client for `chat.postMessage`.
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl SlackClient {
    pub fn new(http: reqwest::Client, token: impl Into<String>, api_base: Option<String>) -> Self {
        Self {
            http,
            token: token.into(),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.into()),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn build_url(&self, method: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            method.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl MessagePoster for SlackClient {
    async fn post_message(
        &self,
        request: &PostMessageRequest,
    ) -> Result<PostedMessage, SlackError> {
        let span = tracing::info_span!("slack.post_message", channel = %request.channel);
        self.send(request).instrument(span).await
    }
}

impl SlackClient {
    async fn send(&self, request: &PostMessageRequest) -> Result<PostedMessage, SlackError> {
        let url = self.build_url(POST_MESSAGE);
        tracing::debug!(%url, attachments = request.attachments.len(), "posting slack message");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(SlackError::Transport)?;

        let status = response.status();
        let body_text = response.text().await.map_err(SlackError::Transport)?;

        if !status.is_success() {
            return Err(SlackError::Http {
                status,
                body: truncate(body_text, MAX_ERROR_BODY),
            });
        }

        let parsed: RawPostMessageResponse =
            serde_json::from_str(&body_text).map_err(SlackError::Decode)?;

        if !parsed.ok {
            return Err(SlackError::Api {
                error: parsed.error.unwrap_or_else(|| "unknown".into()),
            });
        }

        let ts = parsed.ts.ok_or(SlackError::MissingTimestamp)?;
        Ok(PostedMessage {
            ts,
            channel: parsed.channel,
        })
    }
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut cut = max;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_method() {
        let default = SlackClient::new(reqwest::Client::new(), "xoxb-1", None);
        assert_eq!(
            default.build_url("chat.postMessage"),
            "https://slack.com/api/chat.postMessage"
        );

        let proxied = SlackClient::new(
            reqwest::Client::new(),
            "xoxb-1",
            Some("http://127.0.0.1:9000/api/".into()),
        );
        assert_eq!(
            proxied.build_url("/chat.postMessage"),
            "http://127.0.0.1:9000/api/chat.postMessage"
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let client = SlackClient::new(reqwest::Client::new(), "xoxb-secret", None);
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("xoxb-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn api_errors_read_like_the_slack_sdk() {
        let err = SlackError::Api {
            error: "invalid_auth".into(),
        };
        assert_eq!(err.to_string(), "An API error occurred: invalid_auth");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(10);
        let cut = truncate(body, 5);
        assert_eq!(cut, "éé");
        assert_eq!(truncate("short".into(), 512), "short");
    }
}

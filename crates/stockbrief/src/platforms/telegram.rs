//! Telegram Bot API client
//!
//! Thin JSON-over-HTTPS wrapper around the handful of Bot API methods the bot
//! needs. Every call is a POST to `<base>/bot<token>/<method>` answered with
//! the `{ok, result, description}` envelope.

use crate::error::{BotError, Result};
use crate::interface::{IncomingMessage, MessageSink, OutboundMessage, ParseMode};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Added to the long-poll timeout so the HTTP request outlives the poll
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T> {
        if !self.ok {
            return Err(BotError::Transport(format!(
                "{method}: {}",
                self.description.as_deref().unwrap_or("request rejected")
            )));
        }
        self.result
            .ok_or_else(|| BotError::Transport(format!("{method}: missing result")))
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
}

/// An incoming update; only text messages are of interest
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TgMessage>,
}

impl Update {
    /// The text message carried by this update, if any
    pub fn incoming(&self) -> Option<IncomingMessage> {
        let message = self.message.as_ref()?;
        let text = message.text.as_ref()?;
        Some(IncomingMessage::new(message.chat.id, text.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgMessage {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Telegram Bot API client
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_api_base(API_BASE, token)
    }

    /// Client against a different Bot API server
    pub fn with_api_base(api_base: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(BotError::Config("Telegram bot token is empty".to_string()));
        }
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: format!("{}/bot{token}", api_base.trim_end_matches('/')),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    async fn call<B, T>(&self, method: &str, body: &B, timeout: Option<Duration>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.method_url(method)).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::Transport(format!("{method}: HTTP {status}: {e}")))?;
        envelope.into_result(method)
    }

    /// Send one message
    #[instrument(skip(self, message), fields(chars = message.char_len()))]
    pub async fn send_message(&self, chat_id: i64, message: &OutboundMessage) -> Result<()> {
        let body = SendMessage {
            chat_id,
            text: &message.text,
            parse_mode: message.parse_mode,
        };
        let _sent: serde_json::Value = self.call("sendMessage", &body, None).await?;
        Ok(())
    }

    /// Register the public webhook URL
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        let _: bool = self
            .call("setWebhook", &serde_json::json!({ "url": url }), None)
            .await?;
        Ok(())
    }

    /// Drop any registered webhook so long polling can be used
    pub async fn delete_webhook(&self) -> Result<()> {
        let _: bool = self
            .call("deleteWebhook", &serde_json::json!({}), None)
            .await?;
        Ok(())
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(&self, offset: Option<i64>, timeout: Duration) -> Result<Vec<Update>> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": timeout.as_secs(),
            "allowed_updates": ["message"],
        });
        let updates: Vec<Update> = self
            .call("getUpdates", &body, Some(timeout + POLL_GRACE))
            .await?;
        debug!(count = updates.len(), "Received updates");
        Ok(updates)
    }
}

#[async_trait]
impl MessageSink for TelegramClient {
    async fn send(&self, chat_id: i64, message: &OutboundMessage) -> Result<()> {
        self.send_message(chat_id, message).await
    }
}

//! Telegram Bot API client for reminder delivery.
//!
//! A reminder is a single `sendMessage` request with the recipient and text
//! passed as query parameters. Only the HTTP status is inspected.

use crate::{
    config::TelegramSettings,
    errors::{Error, Result},
    notify::Messenger,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Sends reminders through a Telegram bot.
#[derive(Clone)]
pub struct TelegramMessenger {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl std::fmt::Debug for TelegramMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // token omitted
        f.debug_struct("TelegramMessenger")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl TelegramMessenger {
    /// Creates a messenger for the bot identified by `token`.
    pub fn new(settings: &TelegramSettings, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    #[instrument(skip(self, text), fields(len = text.len()))]
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .get(self.send_message_url())
            .query(&[("chat_id", chat_id), ("text", text)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Telegram accepted message for chat {chat_id}");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Delivery {
            message: format!("Telegram returned {status} for chat {chat_id}: {body}"),
        })
    }
}

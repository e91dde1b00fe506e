//! Reminder delivery.
//!
//! The sweep only depends on the [`Messenger`] trait; [`TelegramMessenger`]
//! is the production implementation.

/// Telegram Bot API messenger
pub mod telegram;

pub use telegram::TelegramMessenger;

use crate::errors::Result;
use async_trait::async_trait;

/// Sends a text message to a delivery address.
///
/// Delivery is fire-and-forget: success means the provider accepted the
/// message, nothing more.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends `text` to `chat_id`.
    async fn send(&self, chat_id: &str, text: &str) -> Result<()>;
}

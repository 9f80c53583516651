//! Outbound transport abstraction.
//!
//! The dispatcher talks to the chat transport only through [`Bot`];
//! production uses the teloxide adapter in the bot crate, tests substitute a
//! recording mock.

use async_trait::async_trait;

use crate::error::BotError;
use crate::types::Keyboard;

/// Sends and edits chat messages. Implementations map to a transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError>;

    /// Sends a rich-text (HTML) message with an optional button layout.
    async fn send_html(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), BotError>;

    /// Replaces the text of an already-sent message (rich-text mode).
    async fn edit_message(&self, chat_id: i64, message_id: i32, text: &str)
        -> Result<(), BotError>;
}

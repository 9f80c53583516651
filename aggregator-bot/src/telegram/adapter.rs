//! Wraps teloxide::Bot and implements [`aggregator_core::Bot`]. Production
//! sends messages via Telegram; tests substitute a recording Bot impl.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode,
};

use aggregator_core::{Bot as CoreBot, BotError, Keyboard};

/// Thin wrapper around teloxide::Bot that implements the core Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn to_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.payload.clone()))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_html(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), BotError> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text.to_string())
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
    ) -> Result<(), BotError> {
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregator_core::Button;

    #[test]
    fn markup_preserves_rows_and_payloads() {
        let keyboard = Keyboard::new(vec![
            vec![Button::new("A", "show:1"), Button::new("B", "show:2")],
            vec![Button::new("C", "del:3")],
        ]);
        let markup = to_markup(&keyboard);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[0][0].text, "A");
    }
}

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Delivers text to the configured chat. One call, one delivery attempt.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat: Recipient) -> Self {
        Self { bot, chat }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        match self.bot.send_message(self.chat.clone(), text).await {
            Ok(_) => {
                debug!("Sent message: {}", text);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send message to Telegram: {}", e);
                Err(Error::SendMessage(e.to_string()))
            }
        }
    }
}

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use teloxide::RequestError;
use tracing::{debug, error};

use crate::config::Config;

/// Delivery channel for finished notification texts.
///
/// `deliver` logs any problem and reports it as `false`; it never errors.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, message: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: &str) -> Self {
        Self {
            bot,
            recipient: parse_recipient(chat_id),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Bot::new(cfg.telegram.bot_token.clone()),
            &cfg.telegram.chat_id,
        )
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }
}

/// Numeric ids address a chat directly; anything else is a channel username.
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let trimmed = chat_id.trim();
    match trimmed.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(trimmed.to_string()),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, message: &str) -> bool {
        match self.bot.send_message(self.recipient.clone(), message).await {
            Ok(_) => {
                debug!(text = message, "bot sent message");
                true
            }
            Err(
                err @ (RequestError::Api(_)
                | RequestError::RetryAfter(_)
                | RequestError::MigrateToChatId(_)),
            ) => {
                error!(%err, "telegram refused the message");
                false
            }
            Err(err) => {
                error!(?err, "unexpected error while sending telegram message");
                false
            }
        }
    }
}

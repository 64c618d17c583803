use std::sync::Arc;

use log::warn;
use teloxide::prelude::*;
use teloxide::types::ChatAction;
use tokio::runtime::Handle;

use crate::config::Config;
use crate::quiz::reporter::{HostShell, Reporter, ShellError};

/// Host shell backed by the bot itself: results are posted to a dedicated chat.
pub struct TelegramShell {
    bot: Bot,
    user_chat: ChatId,
    results_chat: ChatId,
}

impl TelegramShell {
    pub fn new(bot: Bot, user_chat: ChatId, results_chat: ChatId) -> Self {
        Self {
            bot,
            user_chat,
            results_chat,
        }
    }

    fn runtime() -> Result<Handle, ShellError> {
        Handle::try_current().map_err(|err| ShellError::Unavailable(err.to_string()))
    }
}

impl HostShell for TelegramShell {
    fn ready(&self) -> Result<(), ShellError> {
        let bot = self.bot.clone();
        let chat = self.user_chat;
        // It's only a nicety, so the result is ignored
        Self::runtime()?.spawn(async move {
            let _ = bot.send_chat_action(chat, ChatAction::Typing).await;
        });
        Ok(())
    }

    // A chat has no viewport to expand
    fn expand(&self) -> Result<(), ShellError> {
        Ok(())
    }

    fn send_data(&self, data: &str) -> Result<(), ShellError> {
        let bot = self.bot.clone();
        let chat = self.results_chat;
        let user = self.user_chat;
        let data = data.to_string();
        Self::runtime()?.spawn(async move {
            if let Err(err) = bot.send_message(chat, data).await {
                warn!("Failed to deliver quiz result of chat {} to {}: {}", user.0, chat.0, err);
            }
        });
        Ok(())
    }
}

pub fn reporter_for(bot: &Bot, user_chat: ChatId, config: &Config) -> Reporter {
    match config.results_chat {
        Some(results_chat) => Reporter::new(Some(Arc::new(TelegramShell::new(
            bot.clone(),
            user_chat,
            results_chat,
        )))),
        None => Reporter::detached(),
    }
}

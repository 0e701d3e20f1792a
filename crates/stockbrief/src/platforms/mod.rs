//! Chat platform transports
//!
//! Telegram is the only platform. Updates arrive either through the webhook
//! endpoint or by long polling; each one is handled on its own task.

pub mod telegram;
pub mod webhook;

pub use telegram::{TelegramClient, Update};

use crate::bot::StockBot;
use crate::config::{BotConfig, TransportMode};
use crate::error::{BotError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Pause after a failed `getUpdates` before polling again
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Telegram bot
#[derive(Clone)]
pub struct TelegramBot {
    bot: StockBot,
    client: Arc<TelegramClient>,
}

impl TelegramBot {
    pub fn new(bot: StockBot, client: Arc<TelegramClient>) -> Self {
        Self { bot, client }
    }

    /// Bot with a client for the configured token
    pub fn from_config(config: &BotConfig, bot: StockBot) -> Result<Self> {
        let client = TelegramClient::new(config.require_telegram_token()?)?;
        Ok(Self::new(bot, Arc::new(client)))
    }

    pub fn client(&self) -> &TelegramClient {
        &self.client
    }

    /// Run in the configured transport mode until shut down
    pub async fn run(self, config: &BotConfig) -> Result<()> {
        match config.mode {
            TransportMode::Webhook => {
                let url = config.webhook_url.as_deref().ok_or_else(|| {
                    BotError::Config("WEBHOOK_URL is required in webhook mode".to_string())
                })?;
                webhook::serve(self, url, config.port).await
            }
            TransportMode::Polling => self.run_polling(config.poll_timeout).await,
        }
    }

    /// Long-poll `getUpdates` until Ctrl-C
    pub async fn run_polling(self, timeout: Duration) -> Result<()> {
        self.client.delete_webhook().await?;
        info!(timeout_secs = timeout.as_secs(), "Polling for updates");

        let mut offset = None;
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                result = self.client.get_updates(offset, timeout) => match result {
                    Ok(updates) => {
                        for update in updates {
                            offset = Some(update.update_id + 1);
                            self.spawn_update(update);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "getUpdates failed");
                        tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        info!("Polling stopped");
        Ok(())
    }

    /// Handle one update on a new task
    pub fn spawn_update(&self, update: Update) {
        let Some(message) = update.incoming() else {
            return;
        };
        let bot = self.bot.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            bot.dispatch(&message, client.as_ref()).await;
        });
    }
}

pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

//! Stock Analysis Bot
//!
//! Command dispatch for the chat surface. Every failure is turned into a
//! reply here, so nothing past this point sees an error from a command.
//!
//! # Commands
//!
//! - `/start`, `/help`: usage text
//! - `/analyze <TICKER> <EXCHANGE>`: full analysis of one instrument
//! - `/batch`: section summaries for the watchlist, sent as Markdown
//!
//! # Example
//!
//! ```rust,ignore
//! use stockbrief::bot::StockBot;
//! use stockbrief::config::BotConfig;
//! use stockbrief::engine::AnalysisEngine;
//! use std::sync::Arc;
//!
//! let config = BotConfig::from_env()?;
//! let bot = StockBot::new(Arc::new(AnalysisEngine::from_config(&config)?));
//! for message in bot.handle("/analyze TCS NSE").await {
//!     println!("{}", message.text);
//! }
//! ```

pub mod commands;

use crate::engine::AnalysisEngine;
use crate::error::BotError;
use crate::interface::{IncomingMessage, MessageSink, OutboundMessage};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub use commands::{ANALYZE_USAGE, Command};

/// Reply to `/start` and `/help`
pub const START_TEXT: &str = "Welcome! Use /analyze <TICKER> <EXCHANGE> to get stock analysis.";

/// Stock Analysis Bot
#[derive(Clone)]
pub struct StockBot {
    engine: Arc<AnalysisEngine>,
}

impl StockBot {
    pub fn new(engine: Arc<AnalysisEngine>) -> Self {
        Self { engine }
    }

    /// Replies for one chat message, in send order
    ///
    /// Plain text and unknown commands produce no replies.
    pub async fn handle(&self, text: &str) -> Vec<OutboundMessage> {
        match Command::parse(text) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Vec::new(),
            Err(e) => vec![error_reply(&e)],
        }
    }

    /// Execute a parsed command
    pub async fn execute(&self, command: Command) -> Vec<OutboundMessage> {
        info!(command = command.name(), "Handling command");
        match command {
            Command::Start | Command::Help => vec![self.on_start()],
            Command::Analyze { symbol, exchange } => vec![self.on_analyze(&symbol, &exchange).await],
            Command::Batch => self.on_batch().await,
        }
    }

    pub fn on_start(&self) -> OutboundMessage {
        OutboundMessage::plain(START_TEXT)
    }

    /// Single-instrument analysis; any failure becomes the reply
    pub async fn on_analyze(&self, symbol: &str, exchange: &str) -> OutboundMessage {
        match self.engine.analyze(symbol, exchange).await {
            Ok(message) => message,
            Err(e) => {
                warn!(symbol, exchange, error = %e, "Analyze failed");
                error_reply(&e)
            }
        }
    }

    pub async fn on_batch(&self) -> Vec<OutboundMessage> {
        self.engine.batch().await
    }

    /// Handle a message and deliver the replies through `sink`
    ///
    /// Replies go out in order. A failed send is logged and not retried; the
    /// remaining replies are still attempted.
    #[instrument(skip(self, message, sink), fields(chat_id = message.chat_id))]
    pub async fn dispatch(&self, message: &IncomingMessage, sink: &dyn MessageSink) {
        for reply in self.handle(&message.text).await {
            if let Err(e) = sink.send(message.chat_id, &reply).await {
                warn!(error = %e, "Failed to send reply");
            }
        }
    }
}

fn error_reply(err: &BotError) -> OutboundMessage {
    OutboundMessage::plain(format!("⚠️ Error: {err}"))
}

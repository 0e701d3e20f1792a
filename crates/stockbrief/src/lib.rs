//! Fundamental-analysis chat bot
//!
//! This crate answers Telegram commands with LLM-written fundamental analysis
//! of listed stocks. It includes:
//!
//! - Ticker normalization for NSE, BSE, NASDAQ and NYSE symbols
//! - Fundamental metrics from Yahoo Finance or Alpha Vantage
//! - A fixed six-section analysis prompt rendered with MiniJinja
//! - Completion requests through `stockbrief-llm`
//! - Response assembly that keeps every message within Telegram's size limit
//! - A Telegram transport with webhook and long-polling modes
//!
//! # Architecture
//!
//! Commands flow through [`bot::StockBot`] into [`engine::AnalysisEngine`],
//! which runs normalize, fetch, compose, request and assemble in order. The
//! market-data and model calls sit behind the [`MetricsFetcher`] and
//! [`AnalysisRequester`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockbrief::{AnalysisEngine, BotConfig, StockBot, TelegramBot};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BotConfig::from_env()?;
//!     let engine = Arc::new(AnalysisEngine::from_config(&config)?);
//!     let telegram = TelegramBot::from_config(&config, StockBot::new(engine))?;
//!     telegram.run(&config).await?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod assembly;
pub mod bot;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod metrics;
pub mod platforms;
pub mod prompts;
pub mod ticker;
pub mod watchlist;

pub use analysis::{AnalysisRequester, LlmAnalyst};
pub use assembly::{BatchAssembler, MessageLimits, SectionMarker};
pub use bot::{Command, StockBot};
pub use config::{BotConfig, BotConfigBuilder, DataProvider, TransportMode};
pub use engine::AnalysisEngine;
pub use error::{BotError, Result};
pub use interface::{IncomingMessage, OutboundMessage, ParseMode};
pub use metrics::{MetricName, MetricValue, MetricsFetcher, MetricsRecord};
pub use platforms::{TelegramBot, TelegramClient};
pub use ticker::{Exchange, InstrumentRef, normalize};
pub use watchlist::WatchlistEntry;

//! Process-wide configuration
//!
//! Built once at start-up (usually via [`BotConfig::from_env`]) and shared
//! read-only with every component that needs credentials or limits.

use crate::assembly::MessageLimits;
use crate::error::{BotError, Result};
use crate::watchlist::{self, WatchlistEntry};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use stockbrief_utils::{env_opt, env_or, env_parse};

/// Default chat-completion endpoint
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default completion model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default webhook listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Market-data provider for the metrics fetcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataProvider {
    /// Yahoo Finance quote summary (default, no API key required)
    #[default]
    Yahoo,
    /// Alpha Vantage company overview (requires API key; `.NS`/`.BO` tickers
    /// are queried under `.BSE`)
    AlphaVantage,
}

impl FromStr for DataProvider {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "alpha_vantage" | "alphavantage" => Ok(Self::AlphaVantage),
            other => Err(BotError::Config(format!("unknown data provider: {other}"))),
        }
    }
}

/// How the bot receives updates from Telegram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Telegram pushes updates to our HTTP endpoint
    Webhook,
    /// We long-poll `getUpdates`
    #[default]
    Polling,
}

impl FromStr for TransportMode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "webhook" => Ok(Self::Webhook),
            "polling" | "poll" => Ok(Self::Polling),
            other => Err(BotError::Config(format!("unknown transport mode: {other}"))),
        }
    }
}

/// Configuration for the analysis bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token (only needed to serve)
    pub telegram_token: Option<String>,

    /// API key for the completion service
    pub openai_api_key: String,

    /// Base URL of the completion service
    pub openai_api_base: String,

    /// Completion model
    pub model: String,

    /// Maximum tokens per answer
    pub max_tokens: Option<usize>,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Metrics provider
    pub data_provider: DataProvider,

    /// Alpha Vantage API key (optional)
    pub alpha_vantage_api_key: Option<String>,

    /// Alpha Vantage requests per minute
    pub alpha_vantage_rate_limit: u32,

    /// Timeout for the completion call
    pub llm_timeout: Duration,

    /// Timeout for market-data calls
    pub data_timeout: Duration,

    /// Transport mode
    pub mode: TransportMode,

    /// Public base URL Telegram posts webhook updates to
    pub webhook_url: Option<String>,

    /// Listen port for the webhook server
    pub port: u16,

    /// Long-poll timeout for `getUpdates`
    pub poll_timeout: Duration,

    /// Outbound message size limits
    pub limits: MessageLimits,

    /// Instruments covered by `/batch`
    pub watchlist: Vec<WatchlistEntry>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            telegram_token: None,
            openai_api_key: String::new(),
            openai_api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            temperature: None,
            data_provider: DataProvider::Yahoo,
            alpha_vantage_api_key: None,
            alpha_vantage_rate_limit: 5,
            llm_timeout: Duration::from_secs(120),
            data_timeout: Duration::from_secs(30),
            mode: TransportMode::Polling,
            webhook_url: None,
            port: DEFAULT_PORT,
            poll_timeout: Duration::from_secs(30),
            limits: MessageLimits::default(),
            watchlist: watchlist::default_watchlist(),
        }
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `BOT_TOKEN` / `TELEGRAM_BOT_TOKEN` | Telegram bot token |
    /// | `OPENAI_API_KEY` | completion API key (required) |
    /// | `OPENAI_API_BASE` | completion base URL |
    /// | `OPENAI_MODEL` | completion model |
    /// | `WEBHOOK_URL` | public base URL for webhook mode |
    /// | `PORT` | webhook listen port |
    /// | `STOCKBRIEF_MODE` | `webhook` or `polling` |
    /// | `STOCKBRIEF_DATA_PROVIDER` | `yahoo` or `alpha_vantage` |
    /// | `ALPHA_VANTAGE_API_KEY` | Alpha Vantage key |
    pub fn from_env() -> Result<Self> {
        Self::env_builder()?.build()
    }

    /// Builder pre-filled from the environment variables listed on
    /// [`BotConfig::from_env`], for callers that layer further overrides on
    /// top before validating
    pub fn env_builder() -> Result<BotConfigBuilder> {
        let mut builder = Self::builder()
            .openai_api_key(env_opt("OPENAI_API_KEY").unwrap_or_default())
            .openai_api_base(env_or("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE))
            .model(env_or("OPENAI_MODEL", DEFAULT_MODEL));

        if let Some(token) = env_opt("BOT_TOKEN").or_else(|| env_opt("TELEGRAM_BOT_TOKEN")) {
            builder = builder.telegram_token(token);
        }
        if let Some(url) = env_opt("WEBHOOK_URL") {
            builder = builder.webhook_url(url);
        }
        if let Some(port) = env_parse::<u16>("PORT")? {
            builder = builder.port(port);
        }
        if let Some(mode) = env_opt("STOCKBRIEF_MODE") {
            builder = builder.mode(mode.parse()?);
        }
        if let Some(provider) = env_opt("STOCKBRIEF_DATA_PROVIDER") {
            builder = builder.data_provider(provider.parse()?);
        }
        if let Some(key) = env_opt("ALPHA_VANTAGE_API_KEY") {
            builder = builder.alpha_vantage_api_key(key);
        }

        Ok(builder)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            return Err(BotError::Config("OPENAI_API_KEY not set".to_string()));
        }

        if self.data_provider == DataProvider::AlphaVantage && self.alpha_vantage_api_key.is_none()
        {
            return Err(BotError::Config(
                "Alpha Vantage API key required when using the alpha_vantage provider".to_string(),
            ));
        }

        if self.mode == TransportMode::Webhook && self.webhook_url.is_none() {
            return Err(BotError::Config(
                "WEBHOOK_URL required in webhook mode".to_string(),
            ));
        }

        if self.watchlist.is_empty() {
            return Err(BotError::Config("watchlist must not be empty".to_string()));
        }

        self.limits.validate()
    }

    /// Telegram token, required once the bot actually serves chats
    pub fn require_telegram_token(&self) -> Result<&str> {
        self.telegram_token
            .as_deref()
            .ok_or_else(|| BotError::Config("BOT_TOKEN not set".to_string()))
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    telegram_token: Option<String>,
    openai_api_key: Option<String>,
    openai_api_base: Option<String>,
    model: Option<String>,
    max_tokens: Option<Option<usize>>,
    temperature: Option<f32>,
    data_provider: Option<DataProvider>,
    alpha_vantage_api_key: Option<String>,
    llm_timeout: Option<Duration>,
    data_timeout: Option<Duration>,
    mode: Option<TransportMode>,
    webhook_url: Option<String>,
    port: Option<u16>,
    limits: Option<MessageLimits>,
    watchlist: Option<Vec<WatchlistEntry>>,
}

impl BotConfigBuilder {
    /// Set the Telegram bot token
    pub fn telegram_token(mut self, token: impl Into<String>) -> Self {
        self.telegram_token = Some(token.into());
        self
    }

    /// Set the completion API key
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set the completion base URL
    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.openai_api_base = Some(base.into());
        self
    }

    /// Set the completion model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set (or clear) the per-answer token limit
    pub fn max_tokens(mut self, max_tokens: Option<usize>) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the metrics provider
    pub fn data_provider(mut self, provider: DataProvider) -> Self {
        self.data_provider = Some(provider);
        self
    }

    /// Set the Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set the completion timeout
    pub fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = Some(timeout);
        self
    }

    /// Set the market-data timeout
    pub fn data_timeout(mut self, timeout: Duration) -> Self {
        self.data_timeout = Some(timeout);
        self
    }

    /// Set the transport mode
    pub fn mode(mut self, mode: TransportMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the public webhook base URL
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Set the webhook listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set outbound message limits
    pub fn limits(mut self, limits: MessageLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Replace the batch watchlist
    pub fn watchlist(mut self, watchlist: Vec<WatchlistEntry>) -> Self {
        self.watchlist = Some(watchlist);
        self
    }

    /// Build and validate the configuration
    ///
    /// Without an explicit mode, a configured webhook URL selects webhook
    /// mode and its absence selects polling.
    pub fn build(self) -> Result<BotConfig> {
        let defaults = BotConfig::default();
        let mode = self.mode.unwrap_or(if self.webhook_url.is_some() {
            TransportMode::Webhook
        } else {
            TransportMode::Polling
        });

        let config = BotConfig {
            telegram_token: self.telegram_token,
            openai_api_key: self.openai_api_key.unwrap_or(defaults.openai_api_key),
            openai_api_base: self.openai_api_base.unwrap_or(defaults.openai_api_base),
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.or(defaults.temperature),
            data_provider: self.data_provider.unwrap_or(defaults.data_provider),
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            alpha_vantage_rate_limit: defaults.alpha_vantage_rate_limit,
            llm_timeout: self.llm_timeout.unwrap_or(defaults.llm_timeout),
            data_timeout: self.data_timeout.unwrap_or(defaults.data_timeout),
            mode,
            webhook_url: self
                .webhook_url
                .map(|url| url.trim_end_matches('/').to_string()),
            port: self.port.unwrap_or(defaults.port),
            poll_timeout: defaults.poll_timeout,
            limits: self.limits.unwrap_or(defaults.limits),
            watchlist: self.watchlist.unwrap_or(defaults.watchlist),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.data_provider, DataProvider::Yahoo);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.limits.max_chars, 4000);
        assert_eq!(config.limits.soft_threshold, 3900);
        assert_eq!(config.watchlist.len(), 7);
        assert_eq!(config.max_tokens, None);
        // Default has no API key, so it must not validate
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = BotConfig::builder()
            .openai_api_key("sk-test")
            .model("gpt-4o")
            .port(9000)
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.port, 9000);
        assert_eq!(config.mode, TransportMode::Polling);
    }

    #[test]
    fn test_webhook_url_selects_webhook_mode() {
        let config = BotConfig::builder()
            .openai_api_key("sk-test")
            .webhook_url("https://bot.example.com/")
            .build()
            .unwrap();

        assert_eq!(config.mode, TransportMode::Webhook);
        assert_eq!(config.webhook_url.as_deref(), Some("https://bot.example.com"));
    }

    #[test]
    fn test_webhook_mode_requires_url() {
        let result = BotConfig::builder()
            .openai_api_key("sk-test")
            .mode(TransportMode::Webhook)
            .build();
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn test_validation_alpha_vantage_no_key() {
        let result = BotConfig::builder()
            .openai_api_key("sk-test")
            .data_provider(DataProvider::AlphaVantage)
            .build();
        assert!(result.is_err());

        let result = BotConfig::builder()
            .openai_api_key("sk-test")
            .data_provider(DataProvider::AlphaVantage)
            .alpha_vantage_api_key("demo")
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_later_overrides_win_before_validation() {
        // Provider and mode as read from the environment, then replaced
        let config = BotConfig::builder()
            .openai_api_key("sk-test")
            .data_provider(DataProvider::AlphaVantage)
            .webhook_url("https://bot.example.com")
            .data_provider(DataProvider::Yahoo)
            .mode(TransportMode::Polling)
            .build()
            .unwrap();

        assert_eq!(config.data_provider, DataProvider::Yahoo);
        assert_eq!(config.mode, TransportMode::Polling);
    }

    #[test]
    fn test_require_telegram_token() {
        let config = BotConfig::builder().openai_api_key("sk-test").build().unwrap();
        assert!(config.require_telegram_token().is_err());

        let config = BotConfig::builder()
            .openai_api_key("sk-test")
            .telegram_token("123:abc")
            .build()
            .unwrap();
        assert_eq!(config.require_telegram_token().unwrap(), "123:abc");
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Alpha-Vantage".parse::<DataProvider>().unwrap(), DataProvider::AlphaVantage);
        assert_eq!("yahoo".parse::<DataProvider>().unwrap(), DataProvider::Yahoo);
        assert!("bloomberg".parse::<DataProvider>().is_err());
        assert_eq!("WEBHOOK".parse::<TransportMode>().unwrap(), TransportMode::Webhook);
        assert_eq!("poll".parse::<TransportMode>().unwrap(), TransportMode::Polling);
    }
}

//! Error types for the analysis bot

use thiserror::Error;

/// Errors raised anywhere between command parsing and message delivery
#[derive(Debug, Error)]
pub enum BotError {
    /// Malformed or missing command arguments
    #[error("Invalid input: {0}")]
    UserInput(String),

    /// Market-data fetch or analysis request failed
    #[error("{provider} error: {message}")]
    Provider { provider: String, message: String },

    /// Prompt rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat transport (Telegram Bot API) error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BotError {
    /// Shorthand for a provider failure
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

impl From<stockbrief_llm::LLMError> for BotError {
    fn from(err: stockbrief_llm::LLMError) -> Self {
        BotError::provider("LLM", err.to_string())
    }
}

impl From<minijinja::Error> for BotError {
    fn from(err: minijinja::Error) -> Self {
        BotError::Template(err.to_string())
    }
}

impl From<stockbrief_utils::EnvError> for BotError {
    fn from(err: stockbrief_utils::EnvError) -> Self {
        BotError::Config(err.to_string())
    }
}

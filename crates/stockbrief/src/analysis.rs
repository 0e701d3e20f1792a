//! Analysis requests against a chat-completion model

use crate::config::BotConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use stockbrief_llm::providers::{OpenAIConfig, OpenAIProvider};
use stockbrief_llm::{CompletionRequest, LLMProvider, Message};
use tracing::{debug, instrument};

/// Turns a rendered prompt into free-text analysis
#[async_trait]
pub trait AnalysisRequester: Send + Sync {
    async fn request(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str;
}

/// [`AnalysisRequester`] backed by an [`LLMProvider`]
///
/// The prompt is sent as a single user turn with no system prompt.
pub struct LlmAnalyst {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl LlmAnalyst {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<usize>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// OpenAI-compatible analyst using the configured endpoint and model
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let provider_config = OpenAIConfig::new(config.openai_api_key.clone())
            .with_api_base(config.openai_api_base.clone())
            .with_timeout(config.llm_timeout.as_secs());
        let provider = OpenAIProvider::with_config(provider_config)?;

        Ok(Self::new(Arc::new(provider), config.model.clone())
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature))
    }

    fn build_request(&self, prompt: &str) -> CompletionRequest {
        let mut builder =
            CompletionRequest::builder(&self.model).add_message(Message::user(prompt));
        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }
        builder.build()
    }
}

#[async_trait]
impl AnalysisRequester for LlmAnalyst {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.chars().count()))]
    async fn request(&self, prompt: &str) -> Result<String> {
        let response = self.provider.complete(self.build_request(prompt)).await?;
        debug!(
            stop_reason = ?response.stop_reason,
            tokens = response.usage.total(),
            "Received analysis"
        );
        Ok(response.text().to_string())
    }

    fn name(&self) -> &str {
        self.provider.name()
    }
}

//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// Implementations give access to a chat-completion service. The analysis
/// pipeline only ever sends a single user turn and reads back the text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion from the LLM
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, StopReason, TokenUsage};

    #[tokio::test]
    async fn test_mock_provider_roundtrip() {
        let mut provider = MockLLMProvider::new();
        provider
            .expect_complete()
            .withf(|req| req.model == "gpt-4o-mini" && req.messages.len() == 1)
            .times(1)
            .returning(|_| {
                Ok(CompletionResponse {
                    message: Message::assistant("1️⃣ BUY"),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage {
                        input_tokens: 10,
                        output_tokens: 3,
                    },
                })
            });
        provider.expect_name().return_const("mock".to_string());

        let request = CompletionRequest::builder("gpt-4o-mini")
            .add_message(Message::user("hello"))
            .build();
        let response = tokio_test::assert_ok!(provider.complete(request).await);

        assert_eq!(response.text(), "1️⃣ BUY");
        assert_eq!(provider.name(), "mock");
    }
}

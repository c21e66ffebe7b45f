//! The LLM call contract
//!
//! One system message (persona, cite-sources instruction, language
//! directive) plus one user message per call, with fixed sampling
//! parameters. The service is stateless per call: multi-turn memory is a
//! display concern owned by the session, not re-sent to the model.
//!
//! Backend failures never propagate; they map to a localized error string
//! the caller can show as if it were the assistant's reply.

use crate::config::AssistantConfig;
use crate::error::{ChatError, Result};
use crate::i18n;
use crate::language::Language;
use crate::prompts::system_prompt;
use arash_llm::{CompletionRequest, LlmProvider, Message, OpenAiConfig, OpenAiProvider};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Fixed sampling temperature for answers
const ANSWER_TEMPERATURE: f32 = 0.7;

/// Fixed response-length cap in tokens
const MAX_ANSWER_TOKENS: usize = 1000;

/// Owns the conversation contract with the LLM backend
pub struct ConversationService {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl ConversationService {
    /// Build the service from assistant configuration
    ///
    /// Rejects construction before any network call when no credential is
    /// configured.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ChatError::MissingApiKey);
        }

        let mut llm_config = OpenAiConfig::new(config.api_key.clone());
        if let Some(api_base) = &config.api_base {
            llm_config = llm_config.with_api_base(api_base);
        }

        let provider = OpenAiProvider::with_config(llm_config)?;
        Ok(Self::with_provider(Arc::new(provider), &config.model))
    }

    /// Build the service around an existing provider
    pub fn with_provider(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate an answer for a user prompt with optional grounding context
    ///
    /// When `context` is non-empty it is prepended to the prompt with a
    /// blank line. Never fails: backend errors come back as a localized
    /// error string.
    pub async fn generate(&self, user_prompt: &str, context: &str, language: Language) -> String {
        let full_prompt = if context.is_empty() {
            user_prompt.to_string()
        } else {
            format!("{context}\n\n{user_prompt}")
        };

        let request = CompletionRequest::builder(&self.model)
            .system(system_prompt(language, Utc::now().date_naive()))
            .add_message(Message::user(full_prompt))
            .max_tokens(MAX_ANSWER_TOKENS)
            .temperature(ANSWER_TEMPERATURE)
            .build();

        match self.provider.complete(request).await {
            Ok(response) => response.message.content,
            Err(e) => {
                warn!("LLM call failed: {e}");
                i18n::error_message(language, &e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arash_llm::{CompletionResponse, LlmError, StopReason, TokenUsage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the last request and echoes a canned answer
    struct RecordingProvider {
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl RecordingProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> arash_llm::Result<CompletionResponse> {
            *self.last_request.lock().unwrap() = Some(request);
            Ok(CompletionResponse {
                message: Message::assistant("canned answer"),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 1,
                    output_tokens: 1,
                },
            })
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    /// Always fails, simulating a broken backend
    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> arash_llm::Result<CompletionResponse> {
            Err(LlmError::AuthenticationFailed)
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_request_shape_and_parameters() {
        let provider = RecordingProvider::new();
        let service = ConversationService::with_provider(provider.clone(), "gpt-4-turbo");

        let answer = service
            .generate("How is AAPL?", "**Current Prices:**\n- AAPL", Language::English)
            .await;
        assert_eq!(answer, "canned answer");

        let request = provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "gpt-4-turbo");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, 1000);

        // Exactly one system prompt and one user message per call
        assert!(request.system.is_some());
        assert_eq!(request.messages.len(), 1);
        assert_eq!(
            request.messages[0].content,
            "**Current Prices:**\n- AAPL\n\nHow is AAPL?"
        );
    }

    #[tokio::test]
    async fn test_empty_context_sends_prompt_alone() {
        let provider = RecordingProvider::new();
        let service = ConversationService::with_provider(provider.clone(), "gpt-4-turbo");

        service.generate("How is AAPL?", "", Language::English).await;

        let request = provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.messages[0].content, "How is AAPL?");
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_localized_error_string() {
        let service = ConversationService::with_provider(Arc::new(FailingProvider), "gpt-4-turbo");

        let pt = service.generate("Oi", "", Language::Portuguese).await;
        assert!(pt.starts_with("Erro:"));

        let en = service.generate("Hi", "", Language::English).await;
        assert!(en.starts_with("Error:"));
    }

    #[test]
    fn test_missing_api_key_rejected_at_construction() {
        let config = AssistantConfig {
            api_key: String::new(),
            ..AssistantConfig::default()
        };

        let result = ConversationService::from_config(&config);
        assert!(matches!(result, Err(ChatError::MissingApiKey)));
    }
}

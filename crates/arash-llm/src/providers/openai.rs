//! OpenAI provider implementation
//!
//! Implements the [`LlmProvider`] trait against the OpenAI chat-completions
//! endpoint. Also works with OpenAI-compatible APIs (Azure OpenAI, local
//! deployments) through a custom base URL.
//! See: https://platform.openai.com/docs/api-reference/chat

use crate::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, Message, Result, Role,
    StopReason, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the OpenAI API (default: "https://api.openai.com/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY`.
    /// Optionally reads the base URL from `OPENAI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            LlmError::ConfigurationError("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set a custom API base URL
    ///
    /// Useful for Azure OpenAI or local OpenAI-compatible deployments.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// OpenAI provider
///
/// Supports GPT models and OpenAI-compatible APIs through custom
/// configuration.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with custom configuration
    pub fn with_config(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new OpenAI provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAiConfig::new(api_key))
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to OpenAI API at {}", self.config.api_base);

        // System prompt goes into the messages array for OpenAI
        let openai_messages = build_openai_messages(request.system.clone(), &request.messages);

        let openai_request = OpenAiRequest {
            model: request.model.clone(),
            messages: openai_messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimitExceeded(error_text),
                400 => LlmError::InvalidRequest(error_text),
                404 => LlmError::ModelNotFound(request.model),
                _ => LlmError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        // OpenAI can return multiple choices but we use the first
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::UnexpectedResponse("No choices in response".to_string()))?;

        debug!(
            "Received response - stop_reason: {}, tokens: {}/{}",
            choice.finish_reason,
            openai_response.usage.prompt_tokens,
            openai_response.usage.completion_tokens
        );

        let stop_reason = map_stop_reason(&choice.finish_reason);

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            stop_reason,
            usage: TokenUsage {
                input_tokens: openai_response.usage.prompt_tokens,
                output_tokens: openai_response.usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    usage: OpenAiUsage,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[allow(dead_code)]
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build OpenAI messages from our generic format
///
/// Key quirk: the system message goes into the messages array for OpenAI
fn build_openai_messages(system: Option<String>, messages: &[Message]) -> Vec<OpenAiMessage> {
    let mut result = Vec::with_capacity(messages.len() + 1);

    if let Some(sys) = system {
        result.push(OpenAiMessage {
            role: "system".to_string(),
            content: sys,
        });
    }

    for msg in messages {
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        };
        result.push(OpenAiMessage {
            role: role.to_string(),
            content: msg.content.clone(),
        });
    }

    result
}

/// Map an OpenAI stop reason to our format
fn map_stop_reason(reason: &str) -> StopReason {
    match reason {
        "stop" => StopReason::EndTurn,
        "length" => StopReason::MaxTokens,
        _ => {
            debug!("Unknown stop reason: {}", reason);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Configuration for the assistant

use crate::error::{ChatError, Result};
use crate::language::Language;
use std::time::Duration;

/// Default chat model
const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// Configuration for one assistant instance
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// LLM API key (required)
    pub api_key: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Custom LLM API base URL, for OpenAI-compatible deployments
    pub api_base: Option<String>,

    /// Default display language for new sessions
    pub language: Language,

    /// Lifetime of memoized live quotes
    pub quote_cache_ttl: Duration,

    /// Timeout for market-data and news requests
    pub request_timeout: Duration,

    /// How many news results to fetch per chat turn
    pub max_news_results: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: None,
            language: Language::default(),
            quote_cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
            max_news_results: 5,
        }
    }
}

impl AssistantConfig {
    /// Create a new configuration builder
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Load credential and model settings from the environment
    ///
    /// Reads `OPENAI_API_KEY` (required), and `OPENAI_MODEL` /
    /// `OPENAI_API_BASE` when set.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            builder = builder.model(model);
        }
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            builder = builder.api_base(base);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ChatError::MissingApiKey);
        }

        if self.model.trim().is_empty() {
            return Err(ChatError::Config("model must not be empty".to_string()));
        }

        if self.max_news_results == 0 {
            return Err(ChatError::Config(
                "max_news_results must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`AssistantConfig`]
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
    api_base: Option<String>,
    language: Option<Language>,
    quote_cache_ttl: Option<Duration>,
    request_timeout: Option<Duration>,
    max_news_results: Option<usize>,
}

impl AssistantConfigBuilder {
    /// Set the LLM API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a custom LLM API base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the default display language
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the quote cache TTL
    pub fn quote_cache_ttl(mut self, ttl: Duration) -> Self {
        self.quote_cache_ttl = Some(ttl);
        self
    }

    /// Set the market-data request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set how many news results to fetch per turn
    pub fn max_news_results(mut self, max: usize) -> Self {
        self.max_news_results = Some(max);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AssistantConfig> {
        let defaults = AssistantConfig::default();

        let config = AssistantConfig {
            api_key: self.api_key.unwrap_or(defaults.api_key),
            model: self.model.unwrap_or(defaults.model),
            api_base: self.api_base,
            language: self.language.unwrap_or(defaults.language),
            quote_cache_ttl: self.quote_cache_ttl.unwrap_or(defaults.quote_cache_ttl),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_news_results: self.max_news_results.unwrap_or(defaults.max_news_results),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_key_validates() {
        let config = AssistantConfig::builder()
            .api_key("sk-test")
            .model("gpt-4-turbo")
            .language(Language::English)
            .build()
            .unwrap();

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.quote_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = AssistantConfig::builder().build();
        assert!(matches!(result, Err(ChatError::MissingApiKey)));

        let result = AssistantConfig::builder().api_key("   ").build();
        assert!(matches!(result, Err(ChatError::MissingApiKey)));
    }

    #[test]
    fn test_zero_news_results_rejected() {
        let result = AssistantConfig::builder()
            .api_key("sk-test")
            .max_news_results(0)
            .build();
        assert!(matches!(result, Err(ChatError::Config(_))));
    }
}

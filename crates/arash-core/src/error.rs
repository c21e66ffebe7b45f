//! Error types for the conversational core

use thiserror::Error;

/// Errors raised by chat and analysis flows
#[derive(Debug, Error)]
pub enum ChatError {
    /// No LLM credential configured; checked before any network call
    #[error("LLM API key is required; set OPENAI_API_KEY or configure one explicitly")]
    MissingApiKey,

    /// No historical series loaded for the analysis view
    #[error("No historical data loaded; load a ticker and date range first")]
    NoAnalysisLoaded,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] arash_llm::LlmError),

    /// Market data error
    #[error("Market data error: {0}")]
    Market(#[from] arash_market::MarketError),
}

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_error_conversion() {
        let market_err = arash_market::MarketError::EmptySeries("AAPL".to_string());
        let chat_err: ChatError = market_err.into();
        assert!(matches!(chat_err, ChatError::Market(_)));
        assert!(chat_err.to_string().contains("AAPL"));
    }
}

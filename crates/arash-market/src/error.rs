//! Error types for market data operations

use chrono::NaiveDate;
use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// API request failed
    #[error("API error: {0}")]
    Api(String),

    /// Invalid ticker symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Historical series has no rows
    #[error("Historical series for {0} is empty")]
    EmptySeries(String),

    /// Start date is not before the end date
    #[error("Invalid date range: {start} to {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Required OHLC columns absent after normalization
    #[error("Missing required columns {missing:?}; available columns: {present:?}")]
    MissingColumns {
        missing: Vec<String>,
        present: Vec<String>,
    },

    /// Series rows violate an invariant (negative price, bad date)
    #[error("Invalid series data: {0}")]
    InvalidSeries(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    Yahoo(String),
}

/// Result type alias for market operations
pub type Result<T> = std::result::Result<T, MarketError>;

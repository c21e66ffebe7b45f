//! Market data access for the Arash finance assistant
//!
//! This crate wraps the external data collaborators behind small typed
//! clients:
//!
//! - Yahoo Finance for live quotes and historical OHLCV data
//! - DuckDuckGo full-text search for recent news
//! - A time-boxed quote cache to avoid redundant live lookups
//!
//! It also owns the [`HistoricalSeries`] model: normalization of raw
//! tabular rows into a date-ordered OHLCV series, and the summary
//! statistics computed over it.

pub mod cache;
pub mod error;
pub mod news;
pub mod quote;
pub mod series;
pub mod yahoo;

// Re-export main types for convenience
pub use cache::QuoteCache;
pub use error::{MarketError, Result};
pub use news::{NewsClient, NewsItem};
pub use quote::PriceQuote;
pub use series::{HistoricalSeries, OhlcvRow, SeriesStats};
pub use yahoo::YahooClient;

//! Conversational core of the Arash finance assistant
//!
//! This crate turns free-form user text into grounded LLM conversations:
//!
//! - [`extractor`]: heuristic ticker-symbol extraction with stop-word
//!   filtering and deduplication
//! - [`context`]: deterministic assembly of prices, news, and historical
//!   statistics into one bounded context block
//! - [`conversation`]: the LLM call contract (system prompt, message
//!   shape, fixed request parameters, error-to-text mapping)
//! - [`session`]: explicit per-session state (history, loaded analysis,
//!   display language)
//! - [`assistant`]: the orchestrator wiring gateways, cache, and the
//!   conversation service into chat and analysis flows
//!
//! # Example
//!
//! ```rust,ignore
//! use arash_core::{Assistant, AssistantConfig, ChatSession, Language};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AssistantConfig::builder()
//!         .api_key(std::env::var("OPENAI_API_KEY")?)
//!         .language(Language::English)
//!         .build()?;
//!
//!     let assistant = Assistant::new(config)?;
//!     let mut session = ChatSession::new(Language::English);
//!
//!     let answer = assistant.chat(&mut session, "How is AAPL doing?").await;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod chart;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod extractor;
pub mod i18n;
pub mod language;
pub mod prompts;
pub mod session;

// Re-export main types for convenience
pub use assistant::Assistant;
pub use chart::{BarDirection, CandlePoint, ChartFigure, VolumeBar};
pub use config::AssistantConfig;
pub use conversation::ConversationService;
pub use error::{ChatError, Result};
pub use extractor::{MAX_SYMBOLS, Symbol, extract};
pub use language::Language;
pub use session::{AnalysisState, ChatSession, ConversationTurn, TurnRole};

// Re-export the market types that surface through the session API
pub use arash_market::{HistoricalSeries, NewsItem, OhlcvRow, PriceQuote, SeriesStats};

//! The assistant orchestrator
//!
//! Wires the market-data gateway, news search, quote cache, and
//! conversation service into the two user-facing flows: free-form chat
//! and the ticker analysis view. Each call runs to completion before the
//! caller issues the next one; there are no background workers.

use crate::chart::ChartFigure;
use crate::config::AssistantConfig;
use crate::context;
use crate::conversation::ConversationService;
use crate::error::{ChatError, Result};
use crate::extractor;
use crate::i18n::{Label, text};
use crate::session::{AnalysisState, ChatSession};
use arash_market::{
    MarketError, NewsClient, PriceQuote, QuoteCache, SeriesStats, YahooClient,
};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Orchestrates chat turns and analysis actions
pub struct Assistant {
    config: AssistantConfig,
    market: YahooClient,
    news: NewsClient,
    quotes: QuoteCache,
    service: ConversationService,
}

impl Assistant {
    /// Build an assistant from configuration
    ///
    /// Fails before any network call when the configuration carries no
    /// LLM credential.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        config.validate()?;

        let service = ConversationService::from_config(&config)?;
        let market = YahooClient::new(config.request_timeout).map_err(ChatError::Market)?;
        let news = NewsClient::new(config.request_timeout).map_err(ChatError::Market)?;
        let quotes = QuoteCache::new(config.quote_cache_ttl);

        Ok(Self {
            config,
            market,
            news,
            quotes,
            service,
        })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Start a session in the configured default language
    pub fn new_session(&self) -> ChatSession {
        ChatSession::new(self.config.language)
    }

    /// Run one chat turn
    ///
    /// Extracts ticker candidates, resolves their live quotes through the
    /// cache, searches recent news, and sends the assembled context with
    /// the prompt to the LLM. Upstream failures degrade to missing context
    /// sections; the turn itself always produces an answer string, which
    /// is appended to the session history.
    pub async fn chat(&self, session: &mut ChatSession, input: &str) -> String {
        let input = input.trim();
        session.add_user_turn(input);

        let symbols = extractor::extract(input);
        debug!("Extracted symbols: {symbols:?}");

        let mut resolved = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            if let Some(quote) = self.resolve_quote(symbol.as_str()).await {
                resolved.push(quote);
            }
        }

        let news = self
            .news
            .search(input, self.config.max_news_results)
            .await;

        let context = context::build_chat_context(&resolved, &news, session.language());
        let answer = self.service.generate(input, &context, session.language()).await;

        session.add_assistant_turn(answer.clone());
        answer
    }

    /// Load historical data for the analysis view
    ///
    /// Replaces the session's analysis state wholesale and returns the
    /// computed window statistics. Fails on an empty ticker, an inverted
    /// date range, or a window with no rows; the previous state is kept
    /// untouched in every failure case.
    pub async fn load_analysis(
        &self,
        session: &mut ChatSession,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SeriesStats> {
        let symbol = ticker.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ChatError::Market(MarketError::InvalidSymbol(
                ticker.to_string(),
            )));
        }

        let series = self.market.history(&symbol, start, end).await?;
        if series.is_empty() {
            return Err(ChatError::Market(MarketError::EmptySeries(symbol)));
        }

        let stats = SeriesStats::compute(&series)?;
        session.set_analysis(AnalysisState {
            symbol,
            start,
            end,
            series,
            stats,
        });

        Ok(stats)
    }

    /// Answer a question grounded in the loaded historical series
    pub async fn analysis_answer(
        &self,
        session: &ChatSession,
        question: &str,
    ) -> Result<String> {
        let state = session.analysis().ok_or(ChatError::NoAnalysisLoaded)?;

        let context = context::build_analysis_context(
            &state.symbol,
            state.start,
            state.end,
            &state.series,
            session.language(),
        )?;

        Ok(self
            .service
            .generate(question.trim(), &context, session.language())
            .await)
    }

    /// Prepare the two-pane chart figure for the loaded series
    pub fn chart_figure(&self, session: &ChatSession) -> Result<ChartFigure> {
        let state = session.analysis().ok_or(ChatError::NoAnalysisLoaded)?;

        let title = format!(
            "{} - {}",
            state.symbol,
            text(session.language(), Label::DetailedAnalysis)
        );

        ChartFigure::from_series(&state.series, title).map_err(ChatError::Market)
    }

    /// Resolve a live quote through the TTL cache
    ///
    /// Gateway failures convert to "no data": the symbol simply drops out
    /// of the prices section.
    async fn resolve_quote(&self, symbol: &str) -> Option<PriceQuote> {
        if let Some(hit) = self.quotes.get(symbol).await {
            return Some(hit);
        }

        match self.market.quote(symbol).await {
            Ok(quote) => {
                self.quotes.insert(quote.clone()).await;
                Some(quote)
            }
            Err(e) => {
                warn!("Quote lookup failed for {symbol}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn config() -> AssistantConfig {
        AssistantConfig::builder()
            .api_key("sk-test")
            .language(Language::English)
            .build()
            .unwrap()
    }

    #[test]
    fn test_construction_requires_api_key() {
        let result = Assistant::new(AssistantConfig::default());
        assert!(matches!(result, Err(ChatError::MissingApiKey)));
    }

    #[test]
    fn test_new_session_uses_default_language() {
        let assistant = Assistant::new(config()).unwrap();
        let session = assistant.new_session();
        assert_eq!(session.language(), Language::English);
    }

    #[tokio::test]
    async fn test_analysis_answer_requires_loaded_series() {
        let assistant = Assistant::new(config()).unwrap();
        let session = assistant.new_session();

        let result = assistant.analysis_answer(&session, "Trend?").await;
        assert!(matches!(result, Err(ChatError::NoAnalysisLoaded)));
    }

    #[test]
    fn test_chart_requires_loaded_series() {
        let assistant = Assistant::new(config()).unwrap();
        let session = assistant.new_session();

        assert!(matches!(
            assistant.chart_figure(&session),
            Err(ChatError::NoAnalysisLoaded)
        ));
    }

    #[tokio::test]
    async fn test_load_analysis_rejects_empty_ticker() {
        let assistant = Assistant::new(config()).unwrap();
        let mut session = assistant.new_session();

        let start: NaiveDate = "2024-01-01".parse().unwrap();
        let end: NaiveDate = "2024-02-01".parse().unwrap();

        let result = assistant
            .load_analysis(&mut session, "   ", start, end)
            .await;
        assert!(matches!(
            result,
            Err(ChatError::Market(MarketError::InvalidSymbol(_)))
        ));
        assert!(session.analysis().is_none());
    }

    #[tokio::test]
    #[ignore] // Requires network access and a live LLM endpoint
    async fn test_live_chat_turn() {
        let assistant = Assistant::new(AssistantConfig::from_env().unwrap()).unwrap();
        let mut session = assistant.new_session();

        let answer = assistant.chat(&mut session, "How is AAPL doing?").await;
        assert!(!answer.is_empty());
        assert_eq!(session.history().len(), 2);
    }
}

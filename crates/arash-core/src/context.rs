//! Context assembly for LLM grounding
//!
//! Both builders are pure, order-preserving functions: the same inputs
//! always produce byte-identical context text. The output directly shapes
//! model grounding, so determinism here is pinned by tests.

use crate::error::Result;
use crate::i18n::{Label, text};
use crate::language::Language;
use arash_market::{HistoricalSeries, NewsItem, PriceQuote, SeriesStats};
use chrono::NaiveDate;

/// Maximum news items included in a chat context
pub const MAX_NEWS_ITEMS: usize = 3;

/// Rows listed in the analysis context tail
const TAIL_ROWS: usize = 5;

/// Assemble the chat-turn context from resolved quotes and news results
///
/// The prices section is omitted entirely when no quote resolved; the
/// news section caps at [`MAX_NEWS_ITEMS`] entries. Sections are joined
/// with a blank line; with neither section the result is the empty string
/// and no context preamble should be sent at all.
pub fn build_chat_context(
    quotes: &[PriceQuote],
    news: &[NewsItem],
    language: Language,
) -> String {
    let mut sections = Vec::new();

    let price_lines: Vec<String> = quotes
        .iter()
        .filter(|q| q.is_resolved())
        .map(|q| {
            format!(
                "- {} ({}): {:.2} {}",
                q.symbol, q.display_name, q.price, q.currency
            )
        })
        .collect();

    if !price_lines.is_empty() {
        sections.push(format!(
            "{}\n{}",
            text(language, Label::CurrentPrices),
            price_lines.join("\n")
        ));
    }

    if !news.is_empty() {
        let news_lines: Vec<String> = news
            .iter()
            .take(MAX_NEWS_ITEMS)
            .map(|n| format!("- [{}]({})", n.title, n.link))
            .collect();

        sections.push(format!(
            "{}\n{}",
            text(language, Label::RecentNews),
            news_lines.join("\n")
        ));
    }

    sections.join("\n\n")
}

/// Assemble the analysis context for a loaded historical series
///
/// Summarizes the window (latest close, percent change, mean and sample
/// standard deviation of closes) and lists the last five rows' OHLCV.
/// Fails when the series has no rows.
pub fn build_analysis_context(
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    series: &HistoricalSeries,
    language: Language,
) -> Result<String> {
    let stats = SeriesStats::compute(series)?;
    let recent = format_tail(series);

    let context = match language {
        Language::Portuguese => format!(
            "**Dados do ativo {symbol}:**\n\
             - Período: {start} até {end}\n\
             - Preço atual: ${:.2}\n\
             - Variação: {:.2}%\n\
             - Média: ${:.2}\n\
             - Volatilidade (std): ${:.2}\n\
             \n\
             Últimos {TAIL_ROWS} dias:\n{recent}",
            stats.last_close, stats.percent_change, stats.mean_close, stats.std_close,
        ),
        Language::English => format!(
            "**Asset data for {symbol}:**\n\
             - Period: {start} to {end}\n\
             - Current price: ${:.2}\n\
             - Change: {:.2}%\n\
             - Average: ${:.2}\n\
             - Volatility (std): ${:.2}\n\
             \n\
             Last {TAIL_ROWS} days:\n{recent}",
            stats.last_close, stats.percent_change, stats.mean_close, stats.std_close,
        ),
    };

    Ok(context)
}

/// Fixed-width listing of the last rows' OHLCV
fn format_tail(series: &HistoricalSeries) -> String {
    let mut lines = vec![format!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "date", "open", "high", "low", "close", "volume"
    )];

    for row in series.tail(TAIL_ROWS) {
        lines.push(format!(
            "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            row.date.to_string(),
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arash_market::OhlcvRow;

    fn quote(symbol: &str, name: &str, price: f64) -> PriceQuote {
        PriceQuote {
            symbol: symbol.to_string(),
            price,
            currency: "USD".to_string(),
            display_name: name.to_string(),
        }
    }

    fn news_item(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: format!("https://example.com/{title}"),
            snippet: String::new(),
        }
    }

    fn sample_series() -> HistoricalSeries {
        let rows = (1..=7)
            .map(|day| OhlcvRow {
                date: format!("2024-01-{day:02}").parse().unwrap(),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0 + f64::from(day),
                volume: 1_000,
                adj_close: None,
            })
            .collect();
        HistoricalSeries::from_rows("AAPL", rows).unwrap()
    }

    #[test]
    fn test_empty_inputs_give_empty_context() {
        assert_eq!(build_chat_context(&[], &[], Language::Portuguese), "");
    }

    #[test]
    fn test_unresolved_quotes_omit_prices_section() {
        let quotes = [quote("AAPL", "Apple Inc.", 0.0)];
        assert_eq!(build_chat_context(&quotes, &[], Language::English), "");
    }

    #[test]
    fn test_prices_only_context() {
        let quotes = [quote("AAPL", "Apple Inc.", 178.25)];
        let context = build_chat_context(&quotes, &[], Language::English);

        assert_eq!(
            context,
            "**Current Prices:**\n- AAPL (Apple Inc.): 178.25 USD"
        );
        assert!(!context.contains("Recent News"));
    }

    #[test]
    fn test_price_lines_preserve_extraction_order() {
        let quotes = [
            quote("MSFT", "Microsoft", 410.0),
            quote("AAPL", "Apple Inc.", 178.25),
        ];
        let context = build_chat_context(&quotes, &[], Language::English);

        let msft = context.find("MSFT").unwrap();
        let aapl = context.find("AAPL").unwrap();
        assert!(msft < aapl);
    }

    #[test]
    fn test_news_capped_at_three() {
        let news: Vec<NewsItem> = (0..6).map(|i| news_item(&format!("story-{i}"))).collect();
        let context = build_chat_context(&[], &news, Language::English);

        assert!(context.starts_with("**Recent News:**"));
        assert!(context.contains("story-2"));
        assert!(!context.contains("story-3"));
        assert_eq!(context.matches("- [").count(), 3);
    }

    #[test]
    fn test_sections_joined_with_blank_line() {
        let quotes = [quote("AAPL", "Apple Inc.", 178.25)];
        let news = [news_item("story")];
        let context = build_chat_context(&quotes, &news, Language::Portuguese);

        assert!(context.contains("**Preços Atuais:**"));
        assert!(context.contains("\n\n**Notícias Recentes:**"));
        assert!(context.contains("- [story](https://example.com/story)"));
    }

    #[test]
    fn test_analysis_context_is_deterministic() {
        let series = sample_series();
        let start: NaiveDate = "2024-01-01".parse().unwrap();
        let end: NaiveDate = "2024-01-08".parse().unwrap();

        let first =
            build_analysis_context("AAPL", start, end, &series, Language::Portuguese).unwrap();
        let second =
            build_analysis_context("AAPL", start, end, &series, Language::Portuguese).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_analysis_context_contents() {
        let series = sample_series();
        let start: NaiveDate = "2024-01-01".parse().unwrap();
        let end: NaiveDate = "2024-01-08".parse().unwrap();

        let context =
            build_analysis_context("AAPL", start, end, &series, Language::English).unwrap();

        assert!(context.starts_with("**Asset data for AAPL:**"));
        assert!(context.contains("- Period: 2024-01-01 to 2024-01-08"));
        assert!(context.contains("- Current price: $107.00"));
        // tail lists the last five rows only
        assert!(context.contains("2024-01-07"));
        assert!(context.contains("2024-01-03"));
        assert!(!context.contains("2024-01-02 "));
    }

    #[test]
    fn test_analysis_context_empty_series_fails() {
        let series = HistoricalSeries::from_rows("AAPL", Vec::new()).unwrap();
        let start: NaiveDate = "2024-01-01".parse().unwrap();
        let end: NaiveDate = "2024-01-08".parse().unwrap();

        let result = build_analysis_context("AAPL", start, end, &series, Language::English);
        assert!(result.is_err());
    }
}

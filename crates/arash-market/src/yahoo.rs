//! Yahoo Finance market-data client
//!
//! Live quotes come from the v8 chart endpoint, which carries the
//! instrument metadata (display name, currency) the typed history API
//! does not expose. Historical OHLCV data goes through
//! `yahoo_finance_api`.

use crate::error::{MarketError, Result};
use crate::quote::PriceQuote;
use crate::series::{HistoricalSeries, OhlcvRow};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// Yahoo rejects requests without a browser-like user agent
const CHART_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Yahoo Finance API client
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    /// Create a new Yahoo Finance client
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CHART_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Get the latest quote for a symbol
    ///
    /// Returns the last traded price together with the instrument's
    /// display name and currency. Currency falls back to USD and the
    /// display name to the symbol itself when the provider omits them.
    pub async fn quote(&self, symbol: &str) -> Result<PriceQuote> {
        let url = format!("{CHART_BASE_URL}/{symbol}");
        debug!("Fetching Yahoo quote for {} from {}", symbol, url);

        let response = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", "1d")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::Api(format!(
                "Yahoo chart API error {status} for {symbol}: {body}"
            )));
        }

        let data: Value = response.json().await?;

        if let Some(error) = data
            .get("chart")
            .and_then(|c| c.get("error"))
            .filter(|e| !e.is_null())
        {
            let code = error.get("code").and_then(Value::as_str).unwrap_or("unknown");
            let description = error
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("no description");
            return Err(MarketError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: format!("{code}: {description}"),
            });
        }

        parse_quote(symbol, &data)
    }

    /// Get historical daily OHLCV data for a `[start, end)` date range
    pub async fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries> {
        if start >= end {
            return Err(MarketError::InvalidRange { start, end });
        }

        let provider =
            yahoo::YahooConnector::new().map_err(|e| MarketError::Yahoo(e.to_string()))?;

        let start_odt = date_to_offset(start)?;
        let end_odt = date_to_offset(end)?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::Yahoo(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::Yahoo(e.to_string()))?;

        let rows: Vec<OhlcvRow> = quotes
            .iter()
            .map(|q| OhlcvRow {
                date: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now)
                    .date_naive(),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                adj_close: Some(q.adjclose),
            })
            .collect();

        HistoricalSeries::from_rows(symbol, rows)
    }
}

/// Convert a calendar date to the UTC midnight `OffsetDateTime` Yahoo expects
fn date_to_offset(date: NaiveDate) -> Result<OffsetDateTime> {
    let timestamp = date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| MarketError::InvalidSeries(format!("invalid date {date}")))?;

    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| MarketError::Yahoo(format!("invalid timestamp for {date}: {e}")))
}

/// Extract a [`PriceQuote`] from a chart API response
fn parse_quote(symbol: &str, data: &Value) -> Result<PriceQuote> {
    let result = data
        .get("chart")
        .and_then(|c| c.get("result"))
        .and_then(|r| r.get(0))
        .ok_or_else(|| MarketError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "empty chart response".to_string(),
        })?;

    let meta = result.get("meta").ok_or_else(|| MarketError::DataUnavailable {
        symbol: symbol.to_string(),
        reason: "missing chart metadata".to_string(),
    })?;

    let price = meta
        .get("regularMarketPrice")
        .and_then(Value::as_f64)
        .or_else(|| last_close(result))
        .ok_or_else(|| MarketError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no price in response".to_string(),
        })?;

    let currency = meta
        .get("currency")
        .and_then(Value::as_str)
        .unwrap_or("USD")
        .to_string();

    let display_name = meta
        .get("shortName")
        .or_else(|| meta.get("longName"))
        .and_then(Value::as_str)
        .unwrap_or(symbol)
        .to_string();

    Ok(PriceQuote {
        symbol: symbol.to_string(),
        price,
        currency,
        display_name,
    })
}

/// Last non-null close from the chart's quote indicators
fn last_close(result: &Value) -> Option<f64> {
    result
        .get("indicators")
        .and_then(|i| i.get("quote"))
        .and_then(|q| q.get(0))
        .and_then(|q| q.get("close"))
        .and_then(Value::as_array)
        .and_then(|closes| closes.iter().rev().find_map(Value::as_f64))
}

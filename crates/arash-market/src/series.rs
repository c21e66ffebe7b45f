//! OHLCV series model, normalization, and summary statistics

use crate::error::{MarketError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Canonical per-day OHLCV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Dividend/split adjusted close, when the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adj_close: Option<f64>,
}

/// A date-ordered OHLCV series for a single symbol
///
/// Invariants: dates strictly increasing, price fields non-negative.
/// Replaced wholesale on each reload, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    symbol: String,
    rows: Vec<OhlcvRow>,
}

impl HistoricalSeries {
    /// Build a series from already-typed rows
    ///
    /// Rows are sorted by date; rows sharing a date collapse to the last
    /// occurrence. Negative prices are rejected.
    pub fn from_rows(symbol: impl Into<String>, mut rows: Vec<OhlcvRow>) -> Result<Self> {
        for row in &rows {
            let prices = [row.open, row.high, row.low, row.close];
            if prices.iter().any(|p| !p.is_finite() || *p < 0.0) {
                return Err(MarketError::InvalidSeries(format!(
                    "negative or non-finite price on {}",
                    row.date
                )));
            }
        }

        rows.sort_by_key(|r| r.date);

        let mut deduped: Vec<OhlcvRow> = Vec::with_capacity(rows.len());
        for row in rows {
            match deduped.last_mut() {
                Some(last) if last.date == row.date => *last = row,
                _ => deduped.push(row),
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            rows: deduped,
        })
    }

    /// Normalize raw tabular records into a series
    ///
    /// Accepts either a JSON array of row objects, or rows nested under a
    /// symbol-qualified grouping (the first group is selected and
    /// flattened). Column names are matched case- and spacing-insensitively
    /// and the adjusted-close variants unify to one canonical field.
    /// Normalizing an already-normalized series is a no-op.
    pub fn from_records(symbol: impl Into<String>, records: &Value) -> Result<Self> {
        let symbol = symbol.into();

        let raw_rows: &[Value] = match records {
            Value::Array(rows) => rows.as_slice(),
            Value::Object(groups) => groups
                .values()
                .find_map(Value::as_array)
                .map(Vec::as_slice)
                .ok_or_else(|| {
                    MarketError::InvalidSeries(
                        "expected an array of rows or a symbol-keyed group of row arrays"
                            .to_string(),
                    )
                })?,
            _ => {
                return Err(MarketError::InvalidSeries(
                    "expected an array of rows or a symbol-keyed group of row arrays".to_string(),
                ));
            }
        };

        if raw_rows.is_empty() {
            return Ok(Self { symbol, rows: Vec::new() });
        }

        let mut rows = Vec::with_capacity(raw_rows.len());
        for raw in raw_rows {
            let obj = raw.as_object().ok_or_else(|| {
                MarketError::InvalidSeries("series row is not an object".to_string())
            })?;

            let mut fields = std::collections::HashMap::new();
            for (key, value) in obj {
                fields.insert(canonical_column(key), value);
            }

            check_required_columns(&fields)?;

            let date = parse_date(fields["date"])?;
            let open = parse_price(fields["open"], "open", date)?;
            let high = parse_price(fields["high"], "high", date)?;
            let low = parse_price(fields["low"], "low", date)?;
            let close = parse_price(fields["close"], "close", date)?;
            let volume = fields
                .get("volume")
                .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
                .unwrap_or(0);
            let adj_close = fields.get("adj_close").and_then(|v| v.as_f64());

            rows.push(OhlcvRow {
                date,
                open,
                high,
                low,
                close,
                volume,
                adj_close,
            });
        }

        Self::from_rows(symbol, rows)
    }

    /// Serialize the series back to canonical flat records
    pub fn to_records(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|r| {
                    let mut record = json!({
                        "date": r.date.to_string(),
                        "open": r.open,
                        "high": r.high,
                        "low": r.low,
                        "close": r.close,
                        "volume": r.volume,
                    });
                    if let Some(adj) = r.adj_close {
                        record["adj_close"] = json!(adj);
                    }
                    record
                })
                .collect(),
        )
    }

    /// Symbol this series belongs to
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All rows, oldest first
    pub fn rows(&self) -> &[OhlcvRow] {
        &self.rows
    }

    /// The last `n` rows, oldest first
    pub fn tail(&self, n: usize) -> &[OhlcvRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last dates in the series, when non-empty
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

/// Summary statistics over a historical series
///
/// `std_close` is the sample standard deviation (n - 1 denominator),
/// 0.0 when the series has fewer than two rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub last_close: f64,
    pub percent_change: f64,
    pub mean_close: f64,
    pub std_close: f64,
    pub high: f64,
    pub low: f64,
    pub rows: usize,
}

impl SeriesStats {
    /// Compute statistics over the full series window
    ///
    /// Fails when the series has no rows. Percent change is measured from
    /// the first close to the last close; a zero first close yields 0.0.
    pub fn compute(series: &HistoricalSeries) -> Result<Self> {
        let rows = series.rows();
        if rows.is_empty() {
            return Err(MarketError::EmptySeries(series.symbol().to_string()));
        }

        let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();
        let first = closes[0];
        let last = closes[closes.len() - 1];

        let percent_change = if first > 0.0 {
            (last - first) / first * 100.0
        } else {
            0.0
        };

        let mean = closes.iter().sum::<f64>() / closes.len() as f64;

        let std = if closes.len() < 2 {
            0.0
        } else {
            let variance = closes
                .iter()
                .map(|c| (c - mean).powi(2))
                .sum::<f64>()
                / (closes.len() - 1) as f64;
            variance.sqrt()
        };

        let high = rows.iter().map(|r| r.high).fold(f64::MIN, f64::max);
        let low = rows.iter().map(|r| r.low).fold(f64::MAX, f64::min);

        Ok(Self {
            last_close: last,
            percent_change,
            mean_close: mean,
            std_close: std,
            high,
            low,
            rows: rows.len(),
        })
    }
}

/// Fold a column name to its canonical form
///
/// Case, surrounding whitespace, and space/underscore/dash separators are
/// ignored; the adjusted-close spelling variants all land on `adj_close`.
fn canonical_column(key: &str) -> String {
    let folded: String = key
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect();

    match folded.as_str() {
        "adjclose" | "adjustedclose" => "adj_close".to_string(),
        "timestamp" => "date".to_string(),
        other => other.to_string(),
    }
}

fn check_required_columns(fields: &std::collections::HashMap<String, &Value>) -> Result<()> {
    const REQUIRED: [&str; 5] = ["date", "open", "high", "low", "close"];

    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|c| !fields.contains_key(**c))
        .map(|c| (*c).to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let mut present: Vec<String> = fields.keys().cloned().collect();
    present.sort();

    Err(MarketError::MissingColumns { missing, present })
}

fn parse_date(value: &Value) -> Result<NaiveDate> {
    if let Some(s) = value.as_str() {
        // Accept plain dates and datetime strings with a date prefix
        let prefix = if s.len() >= 10 { &s[..10] } else { s };
        return NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
            .map_err(|e| MarketError::InvalidSeries(format!("unparseable date {s:?}: {e}")));
    }

    if let Some(ts) = value.as_i64() {
        return chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| MarketError::InvalidSeries(format!("invalid unix timestamp {ts}")));
    }

    Err(MarketError::InvalidSeries(format!(
        "unparseable date value: {value}"
    )))
}

fn parse_price(value: &Value, column: &str, date: NaiveDate) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        MarketError::InvalidSeries(format!("non-numeric {column} value on {date}"))
    })
}

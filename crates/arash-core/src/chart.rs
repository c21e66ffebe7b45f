//! Chart figure preparation
//!
//! Turns a normalized historical series into the two-pane payload a
//! renderer consumes: a candlestick pane and a volume pane with per-row
//! up/down coloring. Rendering itself stays outside the core; this is
//! only the data contract.

use arash_market::{HistoricalSeries, MarketError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Height share of the price pane
pub const PRICE_PANE_RATIO: f64 = 0.7;

/// Height share of the volume pane
pub const VOLUME_PANE_RATIO: f64 = 0.3;

/// Up/down coloring of a volume bar (close at or above open counts as up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarDirection {
    Up,
    Down,
}

/// One candlestick in the price pane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One bar in the volume pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub date: NaiveDate,
    pub volume: u64,
    pub direction: BarDirection,
}

/// Figure-level metadata for axis scaling and titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub min_price: f64,
    pub max_price: f64,
    pub rows: usize,
}

/// Two-pane price/volume chart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartFigure {
    pub title: String,
    pub price_pane_ratio: f64,
    pub volume_pane_ratio: f64,
    pub candlesticks: Vec<CandlePoint>,
    pub volume: Vec<VolumeBar>,
    pub metadata: ChartMetadata,
}

impl ChartFigure {
    /// Build the figure from a normalized series
    ///
    /// Fails on an empty series; both panes are row-aligned with it.
    pub fn from_series(
        series: &HistoricalSeries,
        title: impl Into<String>,
    ) -> Result<Self, MarketError> {
        let Some((start_date, end_date)) = series.date_span() else {
            return Err(MarketError::EmptySeries(series.symbol().to_string()));
        };

        let rows = series.rows();

        let candlesticks: Vec<CandlePoint> = rows
            .iter()
            .map(|r| CandlePoint {
                date: r.date,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
            })
            .collect();

        let volume: Vec<VolumeBar> = rows
            .iter()
            .map(|r| VolumeBar {
                date: r.date,
                volume: r.volume,
                direction: if r.close >= r.open {
                    BarDirection::Up
                } else {
                    BarDirection::Down
                },
            })
            .collect();

        let min_price = rows.iter().map(|r| r.low).fold(f64::MAX, f64::min);
        let max_price = rows.iter().map(|r| r.high).fold(f64::MIN, f64::max);

        Ok(Self {
            title: title.into(),
            price_pane_ratio: PRICE_PANE_RATIO,
            volume_pane_ratio: VOLUME_PANE_RATIO,
            candlesticks,
            volume,
            metadata: ChartMetadata {
                start_date,
                end_date,
                min_price,
                max_price,
                rows: rows.len(),
            },
        })
    }
}

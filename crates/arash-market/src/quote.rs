//! Live quote data

use serde::{Deserialize, Serialize};

/// A live price quote for one symbol
///
/// Produced per extraction cycle and discarded after the chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Ticker symbol the quote belongs to
    pub symbol: String,
    /// Last traded price
    pub price: f64,
    /// ISO 4217 currency code (e.g. "USD", "BRL")
    pub currency: String,
    /// Human-readable instrument name
    pub display_name: String,
}

impl PriceQuote {
    /// Whether the quote carries a usable price
    ///
    /// Zero or negative prices count as unresolved; the provider returns
    /// zeroes for instruments it cannot price.
    pub fn is_resolved(&self) -> bool {
        self.price > 0.0
    }
}

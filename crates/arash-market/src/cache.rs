//! Time-boxed memoization of live quote lookups
//!
//! Several symbols resolved in quick succession within one session should
//! not refetch the same quote. Entries expire after the configured TTL;
//! a cached value may be up to TTL seconds stale, nothing more is
//! guaranteed. The cache is per-session, never shared.

use crate::quote::PriceQuote;
use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Thread-safe TTL cache for live quotes, keyed by symbol
pub struct QuoteCache {
    cache: Arc<RwLock<TimedCache<String, PriceQuote>>>,
}

impl QuoteCache {
    /// Create a new cache with the given entry lifetime
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a cached quote, if present and not expired
    pub async fn get(&self, symbol: &str) -> Option<PriceQuote> {
        let mut cache = self.cache.write().await;
        let hit = cache.cache_get(&symbol.to_string()).cloned();
        if hit.is_some() {
            tracing::debug!("Quote cache hit for {symbol}");
        } else {
            tracing::debug!("Quote cache miss for {symbol}");
        }
        hit
    }

    /// Insert a freshly fetched quote
    pub async fn insert(&self, quote: PriceQuote) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(quote.symbol.clone(), quote);
    }

    /// Drop all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for QuoteCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

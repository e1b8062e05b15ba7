use analysis_core::{round_to, QuoteData, QuoteSource, StockQuote};
use futures_util::future::join_all;
use market_cache::TtlCache;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

pub struct QuoteDesk {
    source: Arc<dyn QuoteSource>,
    cache: TtlCache<StockQuote>,
    max_batch: usize,
}

fn to_quote(ticker: &str, data: QuoteData) -> StockQuote {
    let price = data.last_price.filter(|p| p.is_finite() && *p != 0.0);
    let prev_close = data.previous_close.filter(|p| p.is_finite() && *p != 0.0);

    let (change, change_pct) = match (price, prev_close) {
        (Some(price), Some(prev)) => {
            let change = price - prev;
            (round_to(change, 2), round_to(change / prev * 100.0, 2))
        }
        _ => (0.0, 0.0),
    };

    StockQuote {
        ticker: ticker.to_string(),
        price: price.map(|p| round_to(p, 2)),
        change,
        change_pct,
    }
}

impl QuoteDesk {
    pub fn new(source: Arc<dyn QuoteSource>, ttl: Duration, max_batch: usize) -> Self {
        Self {
            source,
            cache: TtlCache::new("quotes", ttl),
            max_batch: max_batch.max(1),
        }
    }

    /// Latest quote. An upstream failure yields an empty quote which is
    /// cached like any other, so a failing symbol is not retried until expiry.
    pub async fn quote(&self, ticker: &str) -> StockQuote {
        let ticker = ticker.trim().to_uppercase();
        if let Some(hit) = self.cache.get(&ticker) {
            return hit;
        }

        let quote = match self.source.quote(&ticker).await {
            Ok(data) => to_quote(&ticker, data),
            Err(e) => {
                tracing::warn!("Error fetching quote for {}: {}", ticker, e);
                to_quote(&ticker, QuoteData::default())
            }
        };

        self.cache.put(ticker, quote.clone());
        quote
    }

    /// Quotes for up to `max_batch` distinct tickers (first occurrences kept).
    pub async fn quotes(&self, tickers: &[String]) -> BTreeMap<String, StockQuote> {
        let mut seen = HashSet::new();
        let batch: Vec<String> = tickers
            .iter()
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .take(self.max_batch)
            .collect();

        join_all(batch.iter().map(|t| self.quote(t)))
            .await
            .into_iter()
            .map(|q| (q.ticker.clone(), q))
            .collect()
    }

    pub fn max_batch(&self) -> usize {
        self.max_batch
    }
}

//! Equity Screener
//!
//! Screens a fixed universe of US large caps against min/max bounds on
//! fundamental metrics, directly or through named templates.

use analysis_core::{AnalysisError, SnapshotSource};
use market_cache::TtlCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

pub mod filters;
pub mod metrics;
pub mod templates;

pub use filters::{Bound, BoundKind, ScreenFilters};
pub use metrics::StockMetrics;
pub use templates::{template, ScreenTemplate, TEMPLATES};

pub const SCREEN_UNIVERSE: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "BRK-B",
    "UNH", "JNJ", "JPM", "V", "PG", "XOM", "HD", "MA", "CVX", "MRK",
    "ABBV", "LLY", "PEP", "KO", "COST", "AVGO", "WMT", "MCD", "CSCO",
    "ACN", "CRM", "AMD", "ADBE", "TXN", "NEE", "NFLX", "TMO", "UNP",
    "PM", "INTC", "LOW", "HON", "AMGN", "CAT", "BA", "GS", "BLK",
    "SPGI", "AXP", "DE", "ISRG", "MDLZ", "GILD", "SYK", "ADI", "MMC",
    "VRTX", "LRCX", "REGN", "ETN", "PANW", "SCHW", "BKNG", "CI",
    "MO", "CB", "SO", "DUK", "CME", "ZTS", "BSX", "NOW", "PYPL",
    "SNPS", "CDNS", "APD", "CMG", "ICE", "SHW", "MCO", "PLD", "CL",
    "USB", "WM", "TGT", "ORLY", "GD", "NOC", "EMR", "FDX", "NSC",
    "PLTR", "COIN", "SQ", "ROKU", "SNAP", "UBER", "LYFT", "ABNB",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenResult {
    /// Market cap descending
    pub results: Vec<StockMetrics>,
    pub total_screened: usize,
}

pub struct Screener {
    source: Arc<dyn SnapshotSource>,
    universe: Vec<String>,
    cache: TtlCache<ScreenResult>,
}

impl Screener {
    pub fn new(source: Arc<dyn SnapshotSource>, ttl: Duration) -> Self {
        Self::with_universe(source, ttl, SCREEN_UNIVERSE.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_universe(source: Arc<dyn SnapshotSource>, ttl: Duration, universe: Vec<String>) -> Self {
        Self {
            source,
            universe,
            cache: TtlCache::new("screens", ttl),
        }
    }

    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    pub fn templates(&self) -> &'static [ScreenTemplate] {
        TEMPLATES
    }

    pub async fn run_template(&self, name: &str) -> Result<ScreenResult, AnalysisError> {
        let tpl = template(name)
            .ok_or_else(|| AnalysisError::NotFound(format!("Unknown template: {}", name)))?;
        Ok(self.run(&tpl.screen_filters()).await)
    }

    /// Screen the whole universe. Tickers whose snapshot fails are skipped.
    pub async fn run(&self, filters: &ScreenFilters) -> ScreenResult {
        let key = filters.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let total_screened = self.universe.len();
        tracing::info!("Starting stock screen of {} symbols", total_screened);

        let mut tasks = JoinSet::new();
        for (idx, ticker) in self.universe.iter().cloned().enumerate() {
            let source = Arc::clone(&self.source);
            tasks.spawn(async move {
                let result = source.snapshot(&ticker).await;
                (idx, ticker, result)
            });
        }

        let mut passed: Vec<(usize, StockMetrics)> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, _ticker, Ok(snapshot))) => {
                    let stock = StockMetrics::from_snapshot(&snapshot);
                    if filters.passes(&stock) {
                        passed.push((idx, stock));
                    }
                }
                Ok((_, ticker, Err(e))) => {
                    tracing::warn!("Failed to fetch metrics for {}: {}", ticker, e);
                }
                Err(e) => {
                    tracing::error!("Screen task error: {}", e);
                }
            }
        }

        // universe order first so equal market caps rank deterministically
        passed.sort_by_key(|(idx, _)| *idx);
        let mut results: Vec<StockMetrics> = passed.into_iter().map(|(_, stock)| stock).collect();
        results.sort_by(|a, b| {
            b.market_cap
                .unwrap_or(0.0)
                .total_cmp(&a.market_cap.unwrap_or(0.0))
        });

        tracing::info!(
            "Screen complete: {}/{} stocks passed filters",
            results.len(),
            total_screened
        );

        let result = ScreenResult {
            results,
            total_screened,
        };
        self.cache.put(key, result.clone());
        result
    }
}

//! Alpha Terminal
//!
//! Wires the signal engines (ticker extraction, keyword sentiment, metric
//! derivation, insider clusters, screening, macro) to their data
//! collaborators, each behind its own TTL cache.

use analysis_core::{
    AnalysisError, Cluster, InsiderFilingSource, MacroSource, NewsSource, QuoteSource,
    SentimentOracle, SnapshotSource, StatementSource, StockQuote,
};
use fundamental_analysis::{FinancialReport, FinancialsService};
use insider_tracker::InsiderService;
use macro_indicators::MacroService;
use screener::Screener;
use sentiment_analysis::OracleSentimentService;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod config;
pub mod news;
pub mod quotes;
pub mod telemetry;

pub use config::TerminalConfig;
pub use news::{NewsDesk, NewsFeed};
pub use quotes::QuoteDesk;
pub use telemetry::init_tracing;

/// External data providers. The sentiment oracle is optional.
#[derive(Clone)]
pub struct Collaborators {
    pub news: Arc<dyn NewsSource>,
    pub quotes: Arc<dyn QuoteSource>,
    pub statements: Arc<dyn StatementSource>,
    pub insider_filings: Arc<dyn InsiderFilingSource>,
    pub snapshots: Arc<dyn SnapshotSource>,
    pub macro_series: Arc<dyn MacroSource>,
    pub oracle: Option<Arc<dyn SentimentOracle>>,
}

/// Headlines plus quotes for every ticker they mention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBoard {
    pub feed: NewsFeed,
    pub quotes: BTreeMap<String, StockQuote>,
}

pub struct AlphaTerminal {
    config: TerminalConfig,
    news: NewsDesk,
    quotes: QuoteDesk,
    financials: FinancialsService,
    insiders: InsiderService,
    screener: Screener,
    macros: MacroService,
}

impl AlphaTerminal {
    pub fn new(config: TerminalConfig, collaborators: Collaborators) -> Self {
        let ttls = &config.ttls;
        let oracle = OracleSentimentService::new(collaborators.oracle, ttls.sentiment);

        let terminal = Self {
            news: NewsDesk::new(
                collaborators.news,
                ttls.news,
                oracle,
                config.news_queries.clone(),
                config.news_freshness.clone(),
                config.news_count,
            ),
            quotes: QuoteDesk::new(collaborators.quotes, ttls.quotes, config.quote_max_batch),
            financials: FinancialsService::new(collaborators.statements, ttls.financials),
            insiders: InsiderService::new(
                collaborators.insider_filings,
                ttls.insiders,
                config.insider_lookback_days,
            ),
            screener: Screener::new(collaborators.snapshots, ttls.screens),
            macros: MacroService::new(collaborators.macro_series, ttls.macro_series),
            config,
        };

        tracing::info!(
            watchlist = terminal.config.insider_watchlist.len(),
            news_queries = terminal.config.news_queries.len(),
            macro_configured = terminal.macros.is_configured(),
            "Alpha Terminal ready"
        );
        terminal
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn news(&self) -> &NewsDesk {
        &self.news
    }

    pub fn quotes(&self) -> &QuoteDesk {
        &self.quotes
    }

    pub fn financials(&self) -> &FinancialsService {
        &self.financials
    }

    pub fn insiders(&self) -> &InsiderService {
        &self.insiders
    }

    pub fn screener(&self) -> &Screener {
        &self.screener
    }

    pub fn macros(&self) -> &MacroService {
        &self.macros
    }

    /// Headlines for `query` (or the default queries) with quotes for the
    /// tickers they mention.
    pub async fn market_board(&self, query: Option<&str>) -> MarketBoard {
        let feed = self.news.headlines(query).await;
        let quotes = self.quotes.quotes(&feed.tickers).await;
        MarketBoard { feed, quotes }
    }

    /// Filing-derived metrics with `pe_ratio` filled from the live quote.
    pub async fn financials_with_price(&self, ticker: &str) -> Result<FinancialReport, AnalysisError> {
        let (report, quote) = tokio::join!(self.financials.lookup(ticker), self.quotes.quote(ticker));
        let mut report = report?;
        report.metrics = report.metrics.with_price(quote.price);
        Ok(report)
    }

    /// Buying clusters across the configured watchlist.
    pub async fn insider_clusters(&self) -> Vec<Cluster> {
        self.insiders
            .detect_clusters(
                &self.config.insider_watchlist,
                self.config.cluster_window_days,
                self.config.cluster_min_insiders,
            )
            .await
    }
}

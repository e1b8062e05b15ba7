use analysis_core::{AnalysisError, FinancialStatements, StatementSource};
use futures_util::future::join_all;
use market_cache::TtlCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::metrics::{MetricEngine, MetricSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub ticker: String,
    pub company: Option<String>,
    pub metrics: MetricSet,
    pub statements: FinancialStatements,
}

/// Latest-filing financials per ticker, cached for the financial TTL.
pub struct FinancialsService {
    source: Arc<dyn StatementSource>,
    engine: MetricEngine,
    cache: TtlCache<FinancialReport>,
}

impl FinancialsService {
    pub fn new(source: Arc<dyn StatementSource>, ttl: Duration) -> Self {
        Self {
            source,
            engine: MetricEngine::new(),
            cache: TtlCache::new("financials", ttl),
        }
    }

    pub async fn lookup(&self, ticker: &str) -> Result<FinancialReport, AnalysisError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(AnalysisError::InvalidData("ticker required".to_string()));
        }

        self.cache
            .get_or_fetch(&ticker, || async {
                let statements = self.source.latest_statements(&ticker).await?;
                let metrics = self.engine.derive(&statements);
                tracing::info!(
                    ticker = %ticker,
                    populated = metrics.populated(),
                    "derived financial metrics"
                );
                Ok::<_, AnalysisError>(FinancialReport {
                    ticker: ticker.clone(),
                    company: statements.company.clone(),
                    metrics,
                    statements,
                })
            })
            .await
    }

    /// Reports for several tickers in input order. Failing tickers are logged and left out.
    pub async fn compare(&self, tickers: &[String]) -> Vec<FinancialReport> {
        let results = join_all(tickers.iter().map(|t| self.lookup(t))).await;

        tickers
            .iter()
            .zip(results)
            .filter_map(|(ticker, result)| match result {
                Ok(report) => Some(report),
                Err(e) => {
                    tracing::warn!("Failed to load financials for {}: {}", ticker, e);
                    None
                }
            })
            .collect()
    }
}

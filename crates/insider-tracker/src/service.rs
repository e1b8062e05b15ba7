use analysis_core::{AnalysisError, Cluster, InsiderFilingSource, InsiderTrade};
use chrono::{NaiveDate, Utc};
use futures_util::future::join_all;
use market_cache::TtlCache;
use std::sync::Arc;
use std::time::Duration;

use crate::clusters::detect_clusters;
use crate::parser::{parse_filings, ParseReport};

pub struct InsiderService {
    source: Arc<dyn InsiderFilingSource>,
    cache: TtlCache<ParseReport>,
    lookback_days: u32,
}

impl InsiderService {
    pub fn new(source: Arc<dyn InsiderFilingSource>, ttl: Duration, lookback_days: u32) -> Self {
        Self {
            source,
            cache: TtlCache::new("insiders", ttl),
            lookback_days,
        }
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Trades filed in the last `days`, newest first, along with whatever was
    /// skipped as malformed. Cached per `ticker|days`.
    pub async fn get_trades(&self, ticker: &str, days: u32) -> Result<ParseReport, AnalysisError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(AnalysisError::InvalidData("ticker required".to_string()));
        }
        let key = format!("{}|{}", ticker, days);

        self.cache
            .get_or_fetch(&key, || async {
                let filings = self.source.insider_filings(&ticker).await?;
                let report = parse_filings(&ticker, &filings, today(), days);
                if !report.skipped.is_empty() {
                    tracing::debug!(
                        ticker = %ticker,
                        skipped = report.skipped.len(),
                        "skipped malformed insider filings"
                    );
                }
                Ok::<_, AnalysisError>(report)
            })
            .await
    }

    /// Scan `universe` concurrently and rank buying clusters. Tickers whose
    /// filings cannot be fetched are logged and left out.
    pub async fn detect_clusters(&self, universe: &[String], window_days: u32, min_insiders: usize) -> Vec<Cluster> {
        let days = self.lookback_days.max(window_days);
        let results = join_all(universe.iter().map(|t| self.get_trades(t, days))).await;

        let trades_by_ticker: Vec<(String, Vec<InsiderTrade>)> = universe
            .iter()
            .zip(results)
            .filter_map(|(ticker, result)| match result {
                Ok(report) => Some((ticker.trim().to_uppercase(), report.trades)),
                Err(e) => {
                    tracing::warn!("Failed to fetch insider trades for {}: {}", ticker, e);
                    None
                }
            })
            .collect();

        let clusters = detect_clusters(&trades_by_ticker, today(), window_days, min_insiders);
        tracing::info!(
            scanned = trades_by_ticker.len(),
            clusters = clusters.len(),
            "insider cluster scan complete"
        );
        clusters
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SkipReason;
    use analysis_core::{InsiderFiling, RawTransaction, ReportingOwner};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockEdgar {
        calls: AtomicUsize,
    }

    fn filing(days_ago: i64, name: &str, shares: f64, price: f64) -> InsiderFiling {
        InsiderFiling {
            filing_date: Some((today() - chrono::Duration::days(days_ago)).format("%Y-%m-%d").to_string()),
            owner: Some(ReportingOwner {
                name: Some(name.to_string()),
                title: None,
            }),
            transactions: vec![RawTransaction {
                acquired_disposed: Some("A".to_string()),
                transaction_code: Some("P".to_string()),
                shares: Some(shares),
                price: Some(price),
            }],
        }
    }

    #[async_trait]
    impl InsiderFilingSource for MockEdgar {
        async fn insider_filings(&self, ticker: &str) -> Result<Vec<InsiderFiling>, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match ticker {
                "ACME" => Ok(vec![
                    filing(2, "Alice", 100.0, 10.0),
                    filing(5, "Bob", 300.0, 10.0),
                    filing(9, "Carol", 200.0, 10.0),
                    filing(60, "Dave", 900.0, 10.0),
                ]),
                "QUIET" => Ok(vec![filing(3, "Alice", 10.0, 1.0)]),
                "SHAKY" => {
                    let mut undated = filing(1, "Erin", 50.0, 5.0);
                    undated.filing_date = None;
                    Ok(vec![filing(1, "Alice", 10.0, 1.0), filing(2, "Bob", -5.0, 1.0), undated])
                }
                _ => Err(AnalysisError::ApiError("EDGAR unavailable".to_string())),
            }
        }
    }

    fn service() -> (Arc<MockEdgar>, InsiderService) {
        let source = Arc::new(MockEdgar { calls: AtomicUsize::new(0) });
        let service = InsiderService::new(source.clone(), Duration::from_secs(1800), 90);
        (source, service)
    }

    #[tokio::test]
    async fn test_get_trades_sorted_and_cached() {
        let (source, service) = service();

        let report = service.get_trades("acme", 90).await.unwrap();
        assert!(report.skipped.is_empty());
        let names: Vec<_> = report.trades.iter().map(|t| t.insider_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);

        service.get_trades("ACME", 90).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        // a different window is a different cache entry
        let recent = service.get_trades("ACME", 30).await.unwrap();
        assert_eq!(recent.trades.len(), 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_trades_reports_skipped_filings() {
        let (source, service) = service();

        let report = service.get_trades("SHAKY", 90).await.unwrap();
        assert_eq!(report.trades.len(), 1);
        assert_eq!(report.trades[0].insider_name, "Alice");
        assert_eq!(
            report.skipped,
            vec![
                SkipReason::BadShares { filing: 1, transaction: 0 },
                SkipReason::MissingFilingDate { filing: 2 },
            ]
        );

        // skip details survive the cache
        let cached = service.get_trades("shaky", 90).await.unwrap();
        assert_eq!(cached.skipped.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_detect_clusters_skips_failing_tickers() {
        let (_, service) = service();
        let universe = vec!["BROKEN".to_string(), "QUIET".to_string(), "ACME".to_string()];

        let clusters = service.detect_clusters(&universe, 30, 3).await;

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].ticker, "ACME");
        assert_eq!(clusters[0].insider_count, 3);
        assert_eq!(clusters[0].total_value, 6000.0);
        assert_eq!(clusters[0].trades[0].insider_name, "Bob");
    }

    #[tokio::test]
    async fn test_blank_ticker_rejected() {
        let (_, service) = service();
        assert!(matches!(service.get_trades(" ", 90).await, Err(AnalysisError::InvalidData(_))));
    }
}

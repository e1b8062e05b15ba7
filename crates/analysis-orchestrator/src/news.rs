use analysis_core::{AnalysisError, Article, NewsSource, OracleVerdict};
use futures_util::future::join_all;
use market_cache::TtlCache;
use sentiment_analysis::{KeywordSentimentScorer, OracleSentimentService};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use ticker_extraction::TickerExtractor;

/// Annotated headlines ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsFeed {
    pub articles: Vec<Article>,
    /// Union of every article's tickers, sorted
    pub tickers: Vec<String>,
    pub oracle_available: bool,
}

pub struct NewsDesk {
    source: Arc<dyn NewsSource>,
    cache: TtlCache<Vec<Article>>,
    extractor: TickerExtractor,
    scorer: KeywordSentimentScorer,
    oracle: OracleSentimentService,
    default_queries: Vec<String>,
    freshness: String,
    count: u32,
}

impl NewsDesk {
    pub fn new(
        source: Arc<dyn NewsSource>,
        ttl: Duration,
        oracle: OracleSentimentService,
        default_queries: Vec<String>,
        freshness: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            source,
            cache: TtlCache::new("news", ttl),
            extractor: TickerExtractor::default(),
            scorer: KeywordSentimentScorer::new(),
            oracle,
            default_queries,
            freshness: freshness.into(),
            count,
        }
    }

    pub fn with_extractor(mut self, extractor: TickerExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// One upstream search, cached per `query|freshness|count`. Upstream
    /// failures degrade to an empty list and are not cached.
    pub async fn fetch(&self, query: &str, freshness: &str, count: u32) -> Vec<Article> {
        let key = format!("{}|{}|{}", query, freshness, count);
        let result = self
            .cache
            .get_or_fetch(&key, || self.source.search(query, freshness, count))
            .await;

        match result {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!("Error fetching news for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    /// Fetch several queries and merge them, dropping repeated URLs
    /// (first occurrence wins, query order preserved).
    pub async fn search(&self, queries: &[String], freshness: &str, count: u32) -> Vec<Article> {
        let batches = join_all(queries.iter().map(|q| self.fetch(q, freshness, count))).await;

        let mut seen = HashSet::new();
        batches
            .into_iter()
            .flatten()
            .filter(|article| seen.insert(article.url.clone()))
            .collect()
    }

    /// Headlines for `query`, or the configured default queries when `None`,
    /// annotated with tickers and keyword sentiment.
    pub async fn headlines(&self, query: Option<&str>) -> NewsFeed {
        let queries = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => vec![q.to_string()],
            None => self.default_queries.clone(),
        };

        let mut articles = self.search(&queries, &self.freshness, self.count).await;
        let tickers = self.extractor.annotate_articles(&mut articles);
        self.scorer.score_articles(&mut articles);

        tracing::info!(
            queries = queries.len(),
            articles = articles.len(),
            tickers = tickers.len(),
            "assembled news feed"
        );

        NewsFeed {
            articles,
            tickers: tickers.into_iter().collect(),
            oracle_available: self.oracle.is_available(),
        }
    }

    /// Second-opinion sentiment from the external oracle, when configured.
    pub async fn oracle_sentiment(&self, article: &Article) -> Result<OracleVerdict, AnalysisError> {
        self.oracle.classify(&article.url, &article.text()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{SentimentLabel, SentimentOracle};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockBrave {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NewsSource for MockBrave {
        async fn search(&self, query: &str, _freshness: &str, _count: u32) -> Result<Vec<Article>, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match query {
                "chips" => Ok(vec![
                    Article::new("Nvidia surges to record high", "", "https://n/1"),
                    Article::new("$AMD slides on weak guidance", "", "https://n/2"),
                ]),
                "ai" => Ok(vec![
                    Article::new("Nvidia surges to record high", "duplicate", "https://n/1"),
                    Article::new("Microsoft expands AI push", "", "https://n/3"),
                ]),
                _ => Err(AnalysisError::ApiError("429 Too Many Requests".to_string())),
            }
        }
    }

    struct FixedOracle;

    #[async_trait]
    impl SentimentOracle for FixedOracle {
        async fn classify(&self, _text: &str) -> Result<OracleVerdict, AnalysisError> {
            Ok(OracleVerdict {
                label: SentimentLabel::Bearish,
                score: -0.6,
                reason: "guidance cut".to_string(),
            })
        }
    }

    fn desk(oracle: Option<Arc<dyn SentimentOracle>>) -> (Arc<MockBrave>, NewsDesk) {
        let source = Arc::new(MockBrave { calls: AtomicUsize::new(0) });
        let desk = NewsDesk::new(
            source.clone(),
            Duration::from_secs(300),
            OracleSentimentService::new(oracle, Duration::from_secs(86_400)),
            vec!["chips".to_string(), "ai".to_string()],
            "pd",
            20,
        );
        (source, desk)
    }

    #[tokio::test]
    async fn test_fetch_caches_successes_only() {
        let (source, desk) = desk(None);

        assert_eq!(desk.fetch("chips", "pd", 20).await.len(), 2);
        desk.fetch("chips", "pd", 20).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        // different freshness is a separate entry
        desk.fetch("chips", "pw", 20).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        assert!(desk.fetch("down", "pd", 20).await.is_empty());
        assert!(desk.fetch("down", "pd", 20).await.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_search_dedupes_by_url_in_query_order() {
        let (_, desk) = desk(None);
        let queries = vec!["chips".to_string(), "down".to_string(), "ai".to_string()];
        let articles = desk.search(&queries, "pd", 20).await;

        let urls: Vec<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://n/1", "https://n/2", "https://n/3"]);
        assert_eq!(articles[0].description, "");
    }

    #[tokio::test]
    async fn test_headlines_annotates_articles() {
        let (_, desk) = desk(None);
        let feed = desk.headlines(None).await;

        assert_eq!(feed.articles.len(), 3);
        assert_eq!(feed.articles[0].tickers, vec!["NVDA".to_string()]);
        assert_eq!(feed.articles[0].sentiment, Some(SentimentLabel::Bullish));
        assert_eq!(feed.articles[1].tickers, vec!["AMD".to_string()]);
        assert_eq!(feed.articles[1].sentiment, Some(SentimentLabel::Bearish));
        assert_eq!(feed.tickers, vec!["AMD", "MSFT", "NVDA"]);
        assert!(!feed.oracle_available);
    }

    #[tokio::test]
    async fn test_explicit_query_overrides_defaults() {
        let (source, desk) = desk(None);
        let feed = desk.headlines(Some(" ai ")).await;
        assert_eq!(feed.articles.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_oracle_sentiment() {
        let (_, configured) = desk(Some(Arc::new(FixedOracle)));
        let article = Article::new("$AMD slides on weak guidance", "", "https://n/2");
        let verdict = configured.oracle_sentiment(&article).await.unwrap();
        assert_eq!(verdict.label, SentimentLabel::Bearish);

        let (_, unconfigured) = desk(None);
        assert!(matches!(
            unconfigured.oracle_sentiment(&article).await,
            Err(AnalysisError::NotConfigured(_))
        ));
    }
}

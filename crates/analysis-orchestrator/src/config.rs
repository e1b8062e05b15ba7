use anyhow::{Context, Result};
use market_cache::CacheTtls;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_NEWS_QUERIES: &[&str] = &[
    "US stock market news today",
    "Wall Street equities",
    "S&P 500 Nasdaq Dow Jones news",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalConfig {
    pub ttls: CacheTtls,

    // News
    pub news_queries: Vec<String>,
    pub news_freshness: String, // "pd" = past day
    pub news_count: u32,

    // Insider clusters
    pub insider_watchlist: Vec<String>,
    pub cluster_window_days: u32,
    pub cluster_min_insiders: usize,
    pub insider_lookback_days: u32,

    // Quotes
    pub quote_max_batch: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            ttls: CacheTtls::default(),
            news_queries: DEFAULT_NEWS_QUERIES.iter().map(|q| q.to_string()).collect(),
            news_freshness: "pd".to_string(),
            news_count: 20,
            insider_watchlist: insider_tracker::default_watchlist(),
            cluster_window_days: 30,
            cluster_min_insiders: 3,
            insider_lookback_days: 90,
            quote_max_batch: 25,
        }
    }
}

impl TerminalConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| -> Result<Duration> {
            Ok(Duration::from_secs(parse_or(&lookup, key, default.as_secs())?))
        };

        let config = Self {
            ttls: CacheTtls {
                news: secs("NEWS_CACHE_TTL", defaults.ttls.news)?,
                quotes: secs("STOCK_CACHE_TTL", defaults.ttls.quotes)?,
                financials: secs("FINANCIAL_CACHE_TTL", defaults.ttls.financials)?,
                screens: secs("SCREENER_CACHE_TTL", defaults.ttls.screens)?,
                insiders: secs("INSIDER_CACHE_TTL", defaults.ttls.insiders)?,
                macro_series: secs("MACRO_CACHE_TTL", defaults.ttls.macro_series)?,
                sentiment: secs("SENTIMENT_CACHE_TTL", defaults.ttls.sentiment)?,
            },
            news_queries: list_or(&lookup, "NEWS_QUERIES", ';', defaults.news_queries),
            news_freshness: lookup("NEWS_FRESHNESS")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.news_freshness),
            news_count: parse_or(&lookup, "NEWS_COUNT", defaults.news_count)?,
            insider_watchlist: list_or(&lookup, "INSIDER_WATCHLIST", ',', defaults.insider_watchlist)
                .into_iter()
                .map(|t| t.to_uppercase())
                .collect(),
            cluster_window_days: parse_or(&lookup, "CLUSTER_WINDOW_DAYS", defaults.cluster_window_days)?,
            cluster_min_insiders: parse_or(&lookup, "CLUSTER_MIN_INSIDERS", defaults.cluster_min_insiders)?,
            insider_lookback_days: parse_or(&lookup, "INSIDER_LOOKBACK_DAYS", defaults.insider_lookback_days)?,
            quote_max_batch: parse_or(&lookup, "QUOTE_MAX_BATCH", defaults.quote_max_batch)?,
        };

        if config.quote_max_batch == 0 {
            anyhow::bail!("QUOTE_MAX_BATCH must be at least 1");
        }
        if config.cluster_min_insiders == 0 {
            anyhow::bail!("CLUSTER_MIN_INSIDERS must be at least 1");
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        _ => Ok(default),
    }
}

fn list_or<F>(lookup: &F, key: &str, sep: char, default: Vec<String>) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let items: Vec<String> = lookup(key)
        .map(|raw| {
            raw.split(sep)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    if items.is_empty() {
        default
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = TerminalConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TerminalConfig::default());
        assert_eq!(config.ttls.news, Duration::from_secs(300));
        assert_eq!(config.ttls.quotes, Duration::from_secs(120));
        assert_eq!(config.insider_watchlist.len(), 23);
        assert_eq!(config.news_queries.len(), 3);
    }

    #[test]
    fn test_overrides() {
        let config = TerminalConfig::from_lookup(lookup_from(&[
            ("NEWS_CACHE_TTL", "60"),
            ("NEWS_QUERIES", "semiconductors; ; energy stocks"),
            ("INSIDER_WATCHLIST", "aapl, msft"),
            ("CLUSTER_MIN_INSIDERS", "2"),
            ("NEWS_FRESHNESS", "pw"),
        ]))
        .unwrap();

        assert_eq!(config.ttls.news, Duration::from_secs(60));
        assert_eq!(config.news_queries, vec!["semiconductors", "energy stocks"]);
        assert_eq!(config.insider_watchlist, vec!["AAPL", "MSFT"]);
        assert_eq!(config.cluster_min_insiders, 2);
        assert_eq!(config.news_freshness, "pw");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = TerminalConfig::from_lookup(lookup_from(&[("STOCK_CACHE_TTL", "two minutes")])).unwrap_err();
        assert!(err.to_string().contains("STOCK_CACHE_TTL"));
        assert!(TerminalConfig::from_lookup(lookup_from(&[("QUOTE_MAX_BATCH", "0")])).is_err());
    }
}

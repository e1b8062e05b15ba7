//! TTL cache shared by every external-data accessor.
//!
//! Each data class (news, quotes, financials, screens, insider trades, macro
//! series) owns one `TtlCache` instance with its own TTL. Expiry is checked
//! lazily on read. Concurrent misses on the same key are not collapsed: two
//! callers may both fetch and the last `put` wins.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::future::Future;
use std::time::Duration;

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

pub struct TtlCache<V> {
    name: &'static str,
    ttl: chrono::Duration,
    max_entries: Option<usize>,
    entries: DashMap<String, CacheEntry<V>>,
}

fn to_chrono(ttl: Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500))
}

impl<V: Clone> TtlCache<V> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl: to_chrono(ttl),
            max_entries: None,
            entries: DashMap::new(),
        }
    }

    /// Cap the number of entries. Inserting past the cap purges expired
    /// entries first, then drops the oldest ones.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl.to_std().unwrap_or_default()
    }

    /// Fresh value for `key`, or `None` if missing or older than the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lookup(key, self.ttl)
    }

    /// Like `get`, with a caller-specified TTL instead of the instance one.
    pub fn get_within(&self, key: &str, ttl: Duration) -> Option<V> {
        self.lookup(key, to_chrono(ttl))
    }

    fn lookup(&self, key: &str, ttl: chrono::Duration) -> Option<V> {
        let entry = self.entries.get(key)?;
        let age = Utc::now() - entry.cached_at;
        if age < ttl {
            tracing::debug!(cache = self.name, key, "cache hit");
            Some(entry.data.clone())
        } else {
            tracing::debug!(cache = self.name, key, age_secs = age.num_seconds(), "cache entry stale");
            None
        }
    }

    pub fn put(&self, key: impl Into<String>, value: V) {
        self.put_at(key, value, Utc::now());
    }

    /// Store with an explicit timestamp (backfills, tests).
    pub fn put_at(&self, key: impl Into<String>, value: V, stored_at: DateTime<Utc>) {
        self.entries.insert(key.into(), CacheEntry {
            data: value,
            cached_at: stored_at,
        });
        self.enforce_cap();
    }

    /// Serve from cache, otherwise run `fetch` and store its successful result.
    /// Errors are returned to the caller and never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        tracing::debug!(cache = self.name, key, "cache miss");
        let value = fetch().await?;
        self.put(key, value.clone());
        Ok(value)
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|(_, entry)| entry.data)
    }

    /// Drop every entry older than the TTL. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        let now = Utc::now();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.cached_at < ttl);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!(cache = self.name, removed, "purged expired entries");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn enforce_cap(&self) {
        let Some(max) = self.max_entries else {
            return;
        };
        if self.entries.len() <= max {
            return;
        }
        self.purge_expired();
        while self.entries.len() > max {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().cached_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

/// TTL per class of data, reflecting how fast each goes stale
#[derive(Debug, Clone, PartialEq)]
pub struct CacheTtls {
    pub news: Duration,
    pub quotes: Duration,
    pub financials: Duration,
    pub screens: Duration,
    pub insiders: Duration,
    pub macro_series: Duration,
    pub sentiment: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            news: Duration::from_secs(300),
            quotes: Duration::from_secs(120),
            financials: Duration::from_secs(3600),
            screens: Duration::from_secs(900),
            insiders: Duration::from_secs(1800),
            macro_series: Duration::from_secs(3600),
            sentiment: Duration::from_secs(86_400),
        }
    }
}

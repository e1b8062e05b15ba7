//! Cached access to an external (LLM-backed) sentiment collaborator.
//!
//! Verdicts are cached per article, keyed by the SHA-256 of its URL so the
//! same headline is never re-classified while the entry is fresh.

use analysis_core::{AnalysisError, OracleVerdict, SentimentOracle};
use market_cache::TtlCache;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

pub fn url_hash(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

pub struct OracleSentimentService {
    oracle: Option<Arc<dyn SentimentOracle>>,
    cache: TtlCache<OracleVerdict>,
}

impl OracleSentimentService {
    pub fn new(oracle: Option<Arc<dyn SentimentOracle>>, ttl: Duration) -> Self {
        Self {
            oracle,
            cache: TtlCache::new("sentiment", ttl),
        }
    }

    pub fn is_available(&self) -> bool {
        self.oracle.as_ref().is_some_and(|o| o.is_available())
    }

    /// Classify `text`, cached under the URL hash (or the text hash when the URL is blank).
    pub async fn classify(&self, url: &str, text: &str) -> Result<OracleVerdict, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::InvalidData("text required".to_string()));
        }
        let oracle = match &self.oracle {
            Some(oracle) if oracle.is_available() => oracle,
            _ => {
                return Err(AnalysisError::NotConfigured(
                    "external sentiment provider not configured".to_string(),
                ))
            }
        };

        let key = if url.trim().is_empty() { url_hash(text) } else { url_hash(url) };
        self.cache
            .get_or_fetch(&key, || async {
                let mut verdict = oracle.classify(text).await?;
                verdict.score = verdict.score.clamp(-1.0, 1.0);
                tracing::debug!(label = verdict.label.as_str(), score = verdict.score, "oracle sentiment");
                Ok::<_, AnalysisError>(verdict)
            })
            .await
    }
}

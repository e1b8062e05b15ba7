//! Macro Indicators Dashboard
//!
//! Summaries of FRED-style economic series grouped by category, plus a
//! composite recession probability. Degrades to `NotConfigured` when the
//! series source has no credentials.

use analysis_core::{AnalysisError, MacroSource};
use futures_util::future::join_all;
use market_cache::TtlCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub mod catalog;
pub mod recession;
pub mod summary;

pub use catalog::{category, Category, Frequency, SeriesMeta, SERIES_CATALOG};
pub use recession::{recession_probability, RecessionEstimate, RecessionInputs, RecessionSignal};
pub use summary::{summarize, yoy_change, IndicatorReading, SeriesSummary};

use summary::{clean_values, CATEGORY_HISTORY, OVERVIEW_HISTORY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub name: String,
    pub indicators: Vec<IndicatorReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroOverview {
    pub categories: Vec<CategorySummary>,
}

const OVERVIEW_KEY: &str = "overview";
const RECESSION_KEY: &str = "recession";

pub struct MacroService {
    source: Arc<dyn MacroSource>,
    overview_cache: TtlCache<MacroOverview>,
    category_cache: TtlCache<CategorySummary>,
    recession_cache: TtlCache<RecessionEstimate>,
}

impl MacroService {
    pub fn new(source: Arc<dyn MacroSource>, ttl: Duration) -> Self {
        Self {
            source,
            overview_cache: TtlCache::new("macro_overview", ttl),
            category_cache: TtlCache::new("macro_category", ttl),
            recession_cache: TtlCache::new("macro_recession", ttl),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_configured()
    }

    fn ensure_configured(&self) -> Result<(), AnalysisError> {
        if self.source.is_configured() {
            Ok(())
        } else {
            Err(AnalysisError::NotConfigured("FRED API key not configured".to_string()))
        }
    }

    async fn read_category(&self, category: &Category, history_len: usize) -> CategorySummary {
        let fetches = category.series.iter().map(|meta| async move {
            match self.source.series(meta.id).await {
                Ok(observations) => summarize(meta, &observations, history_len).map(IndicatorReading::Observed),
                Err(e) => {
                    tracing::warn!("Failed to fetch macro series {}: {}", meta.id, e);
                    Some(IndicatorReading::unavailable(meta, e))
                }
            }
        });
        // series with no usable observations are left out
        let indicators = join_all(fetches).await.into_iter().flatten().collect();

        CategorySummary {
            category: category.key.to_string(),
            name: category.display_name(),
            indicators,
        }
    }

    /// Every catalog category with a short history per series.
    pub async fn overview(&self) -> Result<MacroOverview, AnalysisError> {
        self.ensure_configured()?;
        if let Some(hit) = self.overview_cache.get(OVERVIEW_KEY) {
            return Ok(hit);
        }

        let categories = join_all(
            SERIES_CATALOG
                .iter()
                .map(|c| self.read_category(c, OVERVIEW_HISTORY)),
        )
        .await;
        let overview = MacroOverview { categories };

        self.overview_cache.put(OVERVIEW_KEY, overview.clone());
        Ok(overview)
    }

    /// One category with a longer history and year-over-year changes.
    pub async fn category(&self, name: &str) -> Result<CategorySummary, AnalysisError> {
        self.ensure_configured()?;
        let category = catalog::category(name)
            .ok_or_else(|| AnalysisError::NotFound(format!("Unknown category: {}", name)))?;
        if let Some(hit) = self.category_cache.get(category.key) {
            return Ok(hit);
        }

        let summary = self.read_category(category, CATEGORY_HISTORY).await;
        self.category_cache.put(category.key, summary.clone());
        Ok(summary)
    }

    pub async fn recession(&self) -> Result<RecessionEstimate, AnalysisError> {
        self.ensure_configured()?;
        if let Some(hit) = self.recession_cache.get(RECESSION_KEY) {
            return Ok(hit);
        }

        let ids = [
            recession::YIELD_SPREAD_SERIES,
            recession::UNEMPLOYMENT_SERIES,
            recession::INDUSTRIAL_PRODUCTION_SERIES,
            recession::JOBLESS_CLAIMS_SERIES,
            recession::FINANCIAL_STRESS_SERIES,
        ];
        let mut values = join_all(ids.iter().map(|id| async move {
            match self.source.series(id).await {
                Ok(observations) => clean_values(&observations),
                Err(e) => {
                    tracing::warn!("Recession input {} unavailable: {}", id, e);
                    Vec::new()
                }
            }
        }))
        .await
        .into_iter();

        let mut next = || values.next().unwrap_or_default();
        let inputs = RecessionInputs {
            yield_spread: next(),
            unemployment: next(),
            industrial_production: next(),
            jobless_claims: next(),
            financial_stress: next(),
        };

        let estimate = recession_probability(&inputs);
        tracing::info!(
            probability = estimate.probability,
            signals = estimate.signals_used,
            "recession probability"
        );
        self.recession_cache.put(RECESSION_KEY, estimate.clone());
        Ok(estimate)
    }
}

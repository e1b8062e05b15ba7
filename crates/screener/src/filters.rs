use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metrics::StockMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Min,
    Max,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bound<'a> {
    pub metric: &'a str,
    pub kind: BoundKind,
    pub value: f64,
}

/// Screen criteria keyed `<metric>_min` / `<metric>_max`.
///
/// Keys are kept sorted so equal filter sets share a cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenFilters(BTreeMap<String, f64>);

impl ScreenFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parsed bounds; keys without a `_min`/`_max` suffix are ignored.
    pub fn bounds(&self) -> impl Iterator<Item = Bound<'_>> {
        self.0.iter().filter_map(|(key, &value)| {
            if let Some(metric) = key.strip_suffix("_min") {
                Some(Bound { metric, kind: BoundKind::Min, value })
            } else {
                key.strip_suffix("_max")
                    .map(|metric| Bound { metric, kind: BoundKind::Max, value })
            }
        })
    }

    /// A stock passes only if every bounded metric is present and in range.
    pub fn passes(&self, stock: &StockMetrics) -> bool {
        self.bounds().all(|bound| match stock.metric(bound.metric) {
            None => false,
            Some(v) => match bound.kind {
                BoundKind::Min => v >= bound.value,
                BoundKind::Max => v <= bound.value,
            },
        })
    }

    pub fn cache_key(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ScreenFilters {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

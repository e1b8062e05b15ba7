use analysis_core::{round_to, MacroObservation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Frequency, SeriesMeta};

/// Points kept for overview sparklines
pub const OVERVIEW_HISTORY: usize = 12;
/// Points kept for a category drill-down
pub const CATEGORY_HISTORY: usize = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub series_id: String,
    pub name: String,
    pub unit: String,
    pub value: f64,
    /// Latest minus the previous print
    pub change: Option<f64>,
    /// Percent vs. twelve prints earlier, monthly series only
    pub yoy_change: Option<f64>,
    pub date: NaiveDate,
    pub history: Vec<f64>,
}

/// A catalog series as shown to callers; a failed fetch keeps its slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorReading {
    Observed(SeriesSummary),
    Unavailable {
        series_id: String,
        name: String,
        unit: String,
        error: String,
    },
}

impl IndicatorReading {
    pub fn unavailable(meta: &SeriesMeta, error: impl ToString) -> Self {
        IndicatorReading::Unavailable {
            series_id: meta.id.to_string(),
            name: meta.name.to_string(),
            unit: meta.unit.to_string(),
            error: error.to_string(),
        }
    }

    pub fn series_id(&self) -> &str {
        match self {
            IndicatorReading::Observed(summary) => &summary.series_id,
            IndicatorReading::Unavailable { series_id, .. } => series_id,
        }
    }
}

/// Non-missing values in original (oldest first) order.
pub fn clean_values(observations: &[MacroObservation]) -> Vec<f64> {
    observations
        .iter()
        .filter_map(|o| o.value.filter(|v| v.is_finite()))
        .collect()
}

/// Percent change of the last value vs. the one twelve prints earlier.
pub fn yoy_change(values: &[f64]) -> Option<f64> {
    if values.len() <= 12 {
        return None;
    }
    let latest = values[values.len() - 1];
    let year_ago = values[values.len() - 13];
    if year_ago == 0.0 {
        return None;
    }
    Some(round_to((latest - year_ago) / year_ago.abs() * 100.0, 2))
}

/// Latest reading of a series. `None` when no usable observation exists.
pub fn summarize(meta: &SeriesMeta, observations: &[MacroObservation], history_len: usize) -> Option<SeriesSummary> {
    let points: Vec<(NaiveDate, f64)> = observations
        .iter()
        .filter_map(|o| o.value.filter(|v| v.is_finite()).map(|v| (o.date, v)))
        .collect();
    let &(date, latest) = points.last()?;
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();

    let change = values
        .len()
        .checked_sub(2)
        .map(|i| round_to(latest - values[i], 4));
    let yoy = if meta.freq == Frequency::Monthly {
        yoy_change(&values)
    } else {
        None
    };
    let history = values[values.len().saturating_sub(history_len)..].to_vec();

    Some(SeriesSummary {
        series_id: meta.id.to_string(),
        name: meta.name.to_string(),
        unit: meta.unit.to_string(),
        value: round_to(latest, 4),
        change,
        yoy_change: yoy,
        date,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::category;

    fn monthly(values: &[Option<f64>]) -> Vec<MacroObservation> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| MacroObservation {
                date: NaiveDate::from_ymd_opt(2022 + (i / 12) as i32, (i % 12) as u32 + 1, 1).unwrap(),
                value: *v,
            })
            .collect()
    }

    fn unrate() -> &'static SeriesMeta {
        &category("labor").unwrap().series[0]
    }

    #[test]
    fn test_summarize_latest_and_change() {
        let obs = monthly(&[Some(3.5), Some(3.7), None, Some(3.9)]);
        let s = summarize(unrate(), &obs, 12).unwrap();
        assert_eq!(s.value, 3.9);
        assert_eq!(s.change, Some(0.2));
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2022, 4, 1).unwrap());
        assert_eq!(s.history, vec![3.5, 3.7, 3.9]);
        assert_eq!(s.yoy_change, None);
    }

    #[test]
    fn test_single_point_has_no_change() {
        let s = summarize(unrate(), &monthly(&[Some(4.0)]), 12).unwrap();
        assert_eq!(s.change, None);
    }

    #[test]
    fn test_empty_or_all_missing_is_none() {
        assert!(summarize(unrate(), &[], 12).is_none());
        assert!(summarize(unrate(), &monthly(&[None, None]), 12).is_none());
    }

    #[test]
    fn test_history_is_tail() {
        let values: Vec<Option<f64>> = (1..=30).map(|v| Some(v as f64)).collect();
        let s = summarize(unrate(), &monthly(&values), 24).unwrap();
        assert_eq!(s.history.len(), 24);
        assert_eq!(s.history[0], 7.0);
        // 30 vs 18
        assert_eq!(s.yoy_change, Some(66.67));
    }

    #[test]
    fn test_yoy_change() {
        let mut values = vec![100.0; 12];
        values.push(103.0);
        assert_eq!(yoy_change(&values), Some(3.0));
        assert_eq!(yoy_change(&values[1..]), None);
        let mut zero = vec![0.0; 12];
        zero.push(1.0);
        assert_eq!(yoy_change(&zero), None);
    }

    #[test]
    fn test_unavailable_reading_serializes_error() {
        let reading = IndicatorReading::unavailable(unrate(), "timeout");
        assert_eq!(reading.series_id(), "UNRATE");
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["error"], "timeout");
    }
}

//! Composite recession probability from five leading signals.
//!
//! Each available signal scores 0, 0.5 or 1; the probability is their mean
//! as a percentage. Signals without enough history are left out rather than
//! counted as zero.

use analysis_core::round_to;
use serde::{Deserialize, Serialize};

pub const YIELD_SPREAD_SERIES: &str = "T10Y2Y";
pub const UNEMPLOYMENT_SERIES: &str = "UNRATE";
pub const INDUSTRIAL_PRODUCTION_SERIES: &str = "INDPRO";
pub const JOBLESS_CLAIMS_SERIES: &str = "ICSA";
pub const FINANCIAL_STRESS_SERIES: &str = "STLFSI4";

/// Unemployment rise (percentage points over three prints) that trips the signal
const UNEMPLOYMENT_RISE: f64 = 0.5;
/// Recent claims average must exceed the prior one by this factor
const CLAIMS_GROWTH: f64 = 1.1;

/// Cleaned series values, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecessionInputs {
    pub yield_spread: Vec<f64>,
    pub unemployment: Vec<f64>,
    pub industrial_production: Vec<f64>,
    pub jobless_claims: Vec<f64>,
    pub financial_stress: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecessionSignal {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecessionEstimate {
    /// 0-100, one decimal
    pub probability: f64,
    pub signals_used: usize,
    pub signals: Vec<RecessionSignal>,
}

fn flag(tripped: bool) -> f64 {
    if tripped {
        1.0
    } else {
        0.0
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn yield_curve(spread: &[f64]) -> Option<f64> {
    spread.last().map(|&v| flag(v < 0.0))
}

fn unemployment_trend(rate: &[f64]) -> Option<f64> {
    if rate.len() <= 3 {
        return None;
    }
    let recent = rate[rate.len() - 1];
    let three_ago = rate[rate.len() - 4];
    Some(flag(recent > three_ago + UNEMPLOYMENT_RISE))
}

fn industrial_contraction(index: &[f64]) -> Option<f64> {
    if index.len() <= 12 {
        return None;
    }
    Some(flag(index[index.len() - 1] < index[index.len() - 13]))
}

fn claims_trend(claims: &[f64]) -> Option<f64> {
    let n = claims.len();
    if n <= 4 {
        return None;
    }
    let recent = mean(&claims[n - 4..]);
    let prior = if n > 8 { mean(&claims[n - 8..n - 4]) } else { recent };
    Some(flag(recent > prior * CLAIMS_GROWTH))
}

fn financial_stress(index: &[f64]) -> Option<f64> {
    index.last().map(|&v| {
        if v > 1.0 {
            1.0
        } else if v > 0.0 {
            0.5
        } else {
            0.0
        }
    })
}

pub fn recession_probability(inputs: &RecessionInputs) -> RecessionEstimate {
    let candidates = [
        ("yield_curve_inversion", yield_curve(&inputs.yield_spread)),
        ("unemployment_trend", unemployment_trend(&inputs.unemployment)),
        ("industrial_production", industrial_contraction(&inputs.industrial_production)),
        ("jobless_claims", claims_trend(&inputs.jobless_claims)),
        ("financial_stress", financial_stress(&inputs.financial_stress)),
    ];

    let signals: Vec<RecessionSignal> = candidates
        .into_iter()
        .filter_map(|(name, score)| {
            score.map(|score| RecessionSignal {
                name: name.to_string(),
                score,
            })
        })
        .collect();

    let probability = if signals.is_empty() {
        0.0
    } else {
        let scores: Vec<f64> = signals.iter().map(|s| s.score).collect();
        round_to(mean(&scores) * 100.0, 1)
    };

    RecessionEstimate {
        probability,
        signals_used: signals.len(),
        signals,
    }
}

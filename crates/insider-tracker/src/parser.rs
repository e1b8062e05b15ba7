//! Normalizes raw Form 4 filings into `InsiderTrade`s.

use analysis_core::{round_to, InsiderFiling, InsiderTrade, RawTransaction, TradeType};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Only the most recent filings are inspected per ticker
pub const MAX_FILINGS: usize = 50;

const UNKNOWN_INSIDER: &str = "Unknown";

/// Why part of a filing was left out of the trade list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    MissingFilingDate { filing: usize },
    BadFilingDate { filing: usize, raw: String },
    BadShares { filing: usize, transaction: usize },
    BadPrice { filing: usize, transaction: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Filing date descending
    pub trades: Vec<InsiderTrade>,
    pub skipped: Vec<SkipReason>,
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_filing_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn trade_type(txn: &RawTransaction) -> TradeType {
    if let Some(ad) = txn.acquired_disposed.as_deref() {
        if ad.trim().eq_ignore_ascii_case("A") {
            TradeType::Purchase
        } else {
            TradeType::Sale
        }
    } else if let Some(code) = txn.transaction_code.as_deref() {
        TradeType::from_label(code)
    } else {
        TradeType::Unknown
    }
}

/// Missing counts as zero; negative or non-finite is rejected.
fn non_negative(value: Option<f64>) -> Option<f64> {
    let v = value.unwrap_or(0.0);
    (v.is_finite() && v >= 0.0).then_some(v)
}

/// Parse up to `MAX_FILINGS` filings, keeping transactions filed within
/// `days` of `today`. Filings older than the cutoff are dropped silently;
/// malformed ones are recorded in `skipped`.
pub fn parse_filings(ticker: &str, filings: &[InsiderFiling], today: NaiveDate, days: u32) -> ParseReport {
    let cutoff = today - Duration::days(i64::from(days));
    let mut report = ParseReport::default();

    for (filing_idx, filing) in filings.iter().take(MAX_FILINGS).enumerate() {
        let filing_date = match filing.filing_date.as_deref() {
            None => {
                report.skipped.push(SkipReason::MissingFilingDate { filing: filing_idx });
                continue;
            }
            Some(raw) => match parse_filing_date(raw) {
                Some(date) => date,
                None => {
                    report.skipped.push(SkipReason::BadFilingDate {
                        filing: filing_idx,
                        raw: raw.to_string(),
                    });
                    continue;
                }
            },
        };
        if filing_date < cutoff {
            continue;
        }

        let owner = filing.owner.as_ref();
        let insider_name = owner
            .and_then(|o| o.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_INSIDER)
            .to_string();
        let title = owner
            .and_then(|o| o.title.as_deref())
            .unwrap_or_default()
            .trim()
            .to_string();

        for (txn_idx, txn) in filing.transactions.iter().enumerate() {
            let Some(shares) = non_negative(txn.shares) else {
                report.skipped.push(SkipReason::BadShares {
                    filing: filing_idx,
                    transaction: txn_idx,
                });
                continue;
            };
            let Some(price) = non_negative(txn.price) else {
                report.skipped.push(SkipReason::BadPrice {
                    filing: filing_idx,
                    transaction: txn_idx,
                });
                continue;
            };

            let shares = shares.trunc() as u64;
            report.trades.push(InsiderTrade {
                ticker: ticker.to_string(),
                insider_name: insider_name.clone(),
                title: title.clone(),
                trade_type: trade_type(txn),
                shares,
                price: round_to(price, 2),
                value: round_to(shares as f64 * price, 2),
                filing_date,
            });
        }
    }

    report.trades.sort_by(|a, b| b.filing_date.cmp(&a.filing_date));
    report
}

//! Insider Trade Tracker
//!
//! Normalizes Form 4 filings into trades and flags buying clusters: several
//! distinct insiders purchasing the same stock inside a short window.

pub mod clusters;
pub mod parser;
pub mod service;

pub use clusters::detect_clusters;
pub use parser::{parse_filings, ParseReport, SkipReason, MAX_FILINGS};
pub use service::InsiderService;

/// Large caps scanned for clusters when no watchlist is configured
pub const DEFAULT_WATCHLIST: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA",
    "JPM", "BAC", "WFC", "GS", "MS",
    "JNJ", "PFE", "UNH", "MRK", "ABBV",
    "XOM", "CVX", "COP",
    "DIS", "NFLX", "CMCSA",
];

pub fn default_watchlist() -> Vec<String> {
    DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_watchlist() {
        let watchlist = default_watchlist();
        assert_eq!(watchlist.len(), 23);
        assert_eq!(watchlist[0], "AAPL");
        assert_eq!(watchlist.last().map(String::as_str), Some("CMCSA"));
    }
}

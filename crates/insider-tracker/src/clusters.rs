use analysis_core::{round_to, Cluster, InsiderTrade};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// Find tickers where at least `min_insiders` distinct insiders bought within
/// `window_days` of `today` (boundary day included).
///
/// Each insider contributes one trade, their largest; on equal value the
/// first one seen is kept. Trades are ranked by value and clusters by total
/// value, both descending, with ties keeping input order.
pub fn detect_clusters(
    trades_by_ticker: &[(String, Vec<InsiderTrade>)],
    today: NaiveDate,
    window_days: u32,
    min_insiders: usize,
) -> Vec<Cluster> {
    let cutoff = today - Duration::days(i64::from(window_days));
    let min_insiders = min_insiders.max(1);

    let mut clusters: Vec<Cluster> = trades_by_ticker
        .iter()
        .filter_map(|(ticker, trades)| {
            let mut best: Vec<&InsiderTrade> = Vec::new();
            let mut slot_by_insider: HashMap<&str, usize> = HashMap::new();

            let recent_buys = trades
                .iter()
                .filter(|t| t.trade_type.is_buy() && t.filing_date >= cutoff);
            for trade in recent_buys {
                match slot_by_insider.get(trade.insider_name.as_str()) {
                    Some(&slot) => {
                        if trade.value > best[slot].value {
                            best[slot] = trade;
                        }
                    }
                    None => {
                        slot_by_insider.insert(trade.insider_name.as_str(), best.len());
                        best.push(trade);
                    }
                }
            }

            if best.len() < min_insiders {
                return None;
            }

            let mut kept: Vec<InsiderTrade> = best.into_iter().cloned().collect();
            kept.sort_by(|a, b| b.value.total_cmp(&a.value));
            let total_value = round_to(kept.iter().map(|t| t.value).sum(), 2);

            tracing::debug!(ticker = %ticker, insiders = kept.len(), total_value, "insider buying cluster");
            Some(Cluster {
                ticker: ticker.clone(),
                insider_count: kept.len(),
                total_value,
                trades: kept,
            })
        })
        .collect();

    clusters.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    clusters
}

use analysis_core::{round_to, FundamentalSnapshot};
use serde::{Deserialize, Serialize};

/// Screenable view of a stock. Ratio-style fields from the snapshot are
/// converted to percent (2 dp); multiples and market cap pass through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMetrics {
    pub ticker: String,
    pub name: String,
    pub price: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub market_cap: Option<f64>,
    #[serde(rename = "52w_change")]
    pub fifty_two_week_change: Option<f64>,
    pub beta: Option<f64>,
}

fn pct(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| round_to(v * 100.0, 2))
}

impl StockMetrics {
    pub fn from_snapshot(snapshot: &FundamentalSnapshot) -> Self {
        Self {
            ticker: snapshot.ticker.clone(),
            name: snapshot.name.clone().unwrap_or_else(|| snapshot.ticker.clone()),
            price: snapshot.price,
            pe_ratio: snapshot.trailing_pe,
            forward_pe: snapshot.forward_pe,
            pb_ratio: snapshot.price_to_book,
            roe: pct(snapshot.return_on_equity),
            roa: pct(snapshot.return_on_assets),
            debt_to_equity: snapshot.debt_to_equity,
            current_ratio: snapshot.current_ratio,
            gross_margin: pct(snapshot.gross_margins),
            operating_margin: pct(snapshot.operating_margins),
            net_margin: pct(snapshot.profit_margins),
            dividend_yield: pct(snapshot.dividend_yield),
            payout_ratio: pct(snapshot.payout_ratio),
            revenue_growth: pct(snapshot.revenue_growth),
            earnings_growth: pct(snapshot.earnings_growth),
            market_cap: snapshot.market_cap,
            fifty_two_week_change: pct(snapshot.fifty_two_week_change),
            beta: snapshot.beta,
        }
    }

    /// Look up a metric by filter name. Short aliases (`pe`, `pb`,
    /// `debt_equity`) are accepted alongside the field names.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "price" => self.price,
            "pe" | "pe_ratio" => self.pe_ratio,
            "forward_pe" => self.forward_pe,
            "pb" | "pb_ratio" => self.pb_ratio,
            "roe" => self.roe,
            "roa" => self.roa,
            "debt_equity" | "debt_to_equity" => self.debt_to_equity,
            "current_ratio" => self.current_ratio,
            "gross_margin" => self.gross_margin,
            "operating_margin" => self.operating_margin,
            "net_margin" => self.net_margin,
            "dividend_yield" => self.dividend_yield,
            "payout_ratio" => self.payout_ratio,
            "revenue_growth" => self.revenue_growth,
            "earnings_growth" => self.earnings_growth,
            "market_cap" => self.market_cap,
            "52w_change" | "fifty_two_week_change" => self.fifty_two_week_change,
            "beta" => self.beta,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_snapshot_converts_ratios_to_percent() {
        let snapshot = FundamentalSnapshot {
            ticker: "KO".to_string(),
            trailing_pe: Some(24.1),
            return_on_equity: Some(0.4012),
            dividend_yield: Some(0.031),
            fifty_two_week_change: Some(-0.05),
            market_cap: Some(2.6e11),
            ..Default::default()
        };
        let m = StockMetrics::from_snapshot(&snapshot);

        assert_eq!(m.name, "KO");
        assert_eq!(m.roe, Some(40.12));
        assert_eq!(m.dividend_yield, Some(3.1));
        assert_eq!(m.fifty_two_week_change, Some(-5.0));
        assert_eq!(m.pe_ratio, Some(24.1));
        assert_eq!(m.roa, None);
    }

    #[test]
    fn test_metric_aliases() {
        let snapshot = FundamentalSnapshot {
            ticker: "KO".to_string(),
            trailing_pe: Some(20.0),
            price_to_book: Some(9.5),
            debt_to_equity: Some(1.6),
            fifty_two_week_change: Some(0.2),
            ..Default::default()
        };
        let m = StockMetrics::from_snapshot(&snapshot);
        assert_eq!(m.metric("pe"), Some(20.0));
        assert_eq!(m.metric("pb"), Some(9.5));
        assert_eq!(m.metric("debt_equity"), Some(1.6));
        assert_eq!(m.metric("52w_change"), Some(20.0));
        assert_eq!(m.metric("volume"), None);
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// News article as returned by a search collaborator, annotated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Symbols mentioned in title/description (filled by ticker extraction)
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub sentiment: Option<SentimentLabel>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

impl Article {
    pub fn new(title: impl Into<String>, description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Title and description joined by a space, the text every annotator reads.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "bullish",
            SentimentLabel::Bearish => "bearish",
            SentimentLabel::Neutral => "neutral",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "bullish" | "positive" => SentimentLabel::Bullish,
            "bearish" | "negative" => SentimentLabel::Bearish,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// Verdict from an external (LLM-backed) sentiment collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleVerdict {
    pub label: SentimentLabel,
    pub score: f64,
    pub reason: String,
}

/// Insider transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    Purchase,
    Sale,
    Unknown,
}

impl TradeType {
    /// Case-insensitive parse of the labels and codes filers use.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "purchase" | "p" | "buy" => TradeType::Purchase,
            "sale" | "s" | "sell" => TradeType::Sale,
            _ => TradeType::Unknown,
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, TradeType::Purchase)
    }
}

/// A single normalized insider transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderTrade {
    pub ticker: String,
    pub insider_name: String,
    pub title: String,
    pub trade_type: TradeType,
    pub shares: u64,
    pub price: f64,
    /// shares * price, rounded to cents
    pub value: f64,
    pub filing_date: NaiveDate,
}

/// Several distinct insiders buying the same security inside a trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub ticker: String,
    pub insider_count: usize,
    pub total_value: f64,
    /// One best trade per insider, by value descending
    pub trades: Vec<InsiderTrade>,
}

/// Raw Form 4 style filing supplied by a filings collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsiderFiling {
    #[serde(default)]
    pub filing_date: Option<String>,
    #[serde(default)]
    pub owner: Option<ReportingOwner>,
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportingOwner {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTransaction {
    /// "A" (acquired) or "D" (disposed)
    #[serde(default)]
    pub acquired_disposed: Option<String>,
    /// SEC transaction code ("P", "S", "M", ...)
    #[serde(default)]
    pub transaction_code: Option<String>,
    #[serde(default)]
    pub shares: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// One value of a statement line item for a reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodValue {
    pub period: String,
    pub value: Option<f64>,
}

/// Statement line item; label wording varies by filer and taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub label: String,
    pub values: Vec<PeriodValue>,
}

impl StatementRow {
    pub fn value_at(&self, period_idx: usize) -> Option<f64> {
        self.values.get(period_idx).and_then(|v| v.value)
    }
}

/// Income, balance or cash flow statement, most recent period first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    pub periods: Vec<String>,
    pub rows: Vec<StatementRow>,
}

impl StatementTable {
    pub fn new<S: Into<String>>(periods: impl IntoIterator<Item = S>) -> Self {
        Self {
            periods: periods.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, pairing values with the table's periods in order.
    pub fn row(mut self, label: impl Into<String>, values: &[Option<f64>]) -> Self {
        let values = values
            .iter()
            .enumerate()
            .map(|(i, v)| PeriodValue {
                period: self
                    .periods
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("period_{}", i)),
                value: *v,
            })
            .collect();
        self.rows.push(StatementRow {
            label: label.into(),
            values,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three statements of one filing; any may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub company: Option<String>,
    pub income: Option<StatementTable>,
    pub balance: Option<StatementTable>,
    pub cashflow: Option<StatementTable>,
}

/// Last and previous close from a quote collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    pub last_price: Option<f64>,
    pub previous_close: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub ticker: String,
    pub price: Option<f64>,
    pub change: f64,
    pub change_pct: f64,
}

/// Fundamentals for screening, ratios as decimal fractions (0.15 = 15%)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    pub ticker: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub gross_margins: Option<f64>,
    pub operating_margins: Option<f64>,
    pub profit_margins: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub market_cap: Option<f64>,
    pub fifty_two_week_change: Option<f64>,
    pub beta: Option<f64>,
}

/// One point of a macroeconomic series; missing prints are `None`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroObservation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Round to `places` decimals. Values too large to scale are returned as is.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

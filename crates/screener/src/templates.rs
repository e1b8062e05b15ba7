use serde::Serialize;

use crate::filters::ScreenFilters;

/// Named, pre-built screen
#[derive(Debug, Clone, Serialize)]
pub struct ScreenTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub filters: &'static [(&'static str, f64)],
}

impl ScreenTemplate {
    pub fn screen_filters(&self) -> ScreenFilters {
        self.filters.iter().copied().collect()
    }
}

pub const TEMPLATES: &[ScreenTemplate] = &[
    ScreenTemplate {
        key: "buffett_style",
        name: "Buffett-Style Value",
        description: "High ROE, reasonable P/E, consistent earnings",
        filters: &[
            ("roe_min", 15.0),
            ("pe_max", 25.0),
            ("debt_equity_max", 1.0),
            ("market_cap_min", 10_000_000_000.0),
        ],
    },
    ScreenTemplate {
        key: "deep_value",
        name: "Deep Value",
        description: "Low P/E, low P/B, high dividend yield",
        filters: &[("pe_max", 12.0), ("pb_max", 1.5), ("dividend_yield_min", 2.0)],
    },
    ScreenTemplate {
        key: "quality_growth",
        name: "Quality Growth",
        description: "High revenue growth, high margins, strong ROE",
        filters: &[
            ("revenue_growth_min", 15.0),
            ("gross_margin_min", 40.0),
            ("roe_min", 18.0),
        ],
    },
    ScreenTemplate {
        key: "dividend_income",
        name: "Dividend Income",
        description: "High yield, sustainable payout, consistent dividends",
        filters: &[
            ("dividend_yield_min", 3.0),
            ("payout_ratio_max", 75.0),
            ("market_cap_min", 5_000_000_000.0),
        ],
    },
    ScreenTemplate {
        key: "momentum",
        name: "Momentum",
        description: "Strong recent price performance",
        filters: &[("52w_change_min", 20.0), ("market_cap_min", 1_000_000_000.0)],
    },
];

pub fn template(key: &str) -> Option<&'static ScreenTemplate> {
    TEMPLATES.iter().find(|t| t.key == key)
}

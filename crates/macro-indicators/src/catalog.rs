use serde::Serialize;

use Frequency::{Daily, Monthly, Quarterly, Weekly};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frequency {
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
    #[serde(rename = "Q")]
    Quarterly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub freq: Frequency,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub series: &'static [SeriesMeta],
}

impl Category {
    /// "growth" -> "Growth"
    pub fn display_name(&self) -> String {
        self.key
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

const fn series(id: &'static str, name: &'static str, unit: &'static str, freq: Frequency) -> SeriesMeta {
    SeriesMeta { id, name, unit, freq }
}

pub const SERIES_CATALOG: &[Category] = &[
    Category {
        key: "growth",
        series: &[
            series("GDP", "Real GDP", "Bil. $", Quarterly),
            series("A191RL1Q225SBEA", "Real GDP Growth Rate", "%", Quarterly),
            series("INDPRO", "Industrial Production", "Index", Monthly),
            series("RSAFS", "Retail Sales", "Mil. $", Monthly),
        ],
    },
    Category {
        key: "labor",
        series: &[
            series("UNRATE", "Unemployment Rate", "%", Monthly),
            series("PAYEMS", "Nonfarm Payrolls", "Thou.", Monthly),
            series("ICSA", "Initial Jobless Claims", "Thou.", Weekly),
            series("JTSJOL", "Job Openings (JOLTS)", "Thou.", Monthly),
            series("AHETPI", "Avg Hourly Earnings", "$/hr", Monthly),
        ],
    },
    Category {
        key: "inflation",
        series: &[
            series("CPIAUCSL", "CPI (All Items)", "Index", Monthly),
            series("CPILFESL", "Core CPI", "Index", Monthly),
            series("PCEPI", "PCE Price Index", "Index", Monthly),
            series("PCEPILFE", "Core PCE", "Index", Monthly),
            series("T5YIE", "5Y Breakeven Inflation", "%", Daily),
        ],
    },
    Category {
        key: "rates",
        series: &[
            series("FEDFUNDS", "Fed Funds Rate", "%", Monthly),
            series("DGS2", "2Y Treasury Yield", "%", Daily),
            series("DGS10", "10Y Treasury Yield", "%", Daily),
            series("T10Y2Y", "10Y-2Y Spread", "%", Daily),
            series("BAMLH0A0HYM2", "HY Credit Spread", "%", Daily),
        ],
    },
    Category {
        key: "housing",
        series: &[
            series("HOUST", "Housing Starts", "Thou.", Monthly),
            series("PERMIT", "Building Permits", "Thou.", Monthly),
            series("CSUSHPINSA", "Case-Shiller Home Price", "Index", Monthly),
            series("MORTGAGE30US", "30Y Mortgage Rate", "%", Weekly),
        ],
    },
    Category {
        key: "sentiment",
        series: &[
            series("UMCSENT", "U. of Michigan Sentiment", "Index", Monthly),
            series("VIXCLS", "VIX", "Index", Daily),
            series("STLFSI4", "Financial Stress Index", "Index", Weekly),
        ],
    },
];

pub fn category(key: &str) -> Option<&'static Category> {
    SERIES_CATALOG.iter().find(|c| c.key == key)
}

//! Static symbol table: ticker -> canonical company name, plus the set of
//! tickers that double as ordinary English words.

use analysis_core::AnalysisError;
use std::collections::{HashMap, HashSet};

/// Large US listings, name as it usually appears in headlines.
const US_EQUITIES: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc"),
    ("MSFT", "Microsoft"),
    ("GOOGL", "Alphabet"),
    ("GOOG", "Google"),
    ("AMZN", "Amazon"),
    ("NVDA", "Nvidia"),
    ("META", "Meta Platforms"),
    ("TSLA", "Tesla"),
    ("BRK", "Berkshire Hathaway"),
    ("AVGO", "Broadcom"),
    ("ORCL", "Oracle"),
    ("ADBE", "Adobe"),
    ("CRM", "Salesforce"),
    ("AMD", "Advanced Micro Devices"),
    ("INTC", "Intel Corp"),
    ("QCOM", "Qualcomm"),
    ("TXN", "Texas Instruments"),
    ("MU", "Micron Technology"),
    ("AMAT", "Applied Materials"),
    ("LRCX", "Lam Research"),
    ("KLAC", "KLA Corporation"),
    ("ADI", "Analog Devices"),
    ("CSCO", "Cisco Systems"),
    ("IBM", "IBM"),
    ("NOW", "ServiceNow"),
    ("PANW", "Palo Alto Networks"),
    ("SNPS", "Synopsys"),
    ("CDNS", "Cadence Design"),
    ("PLTR", "Palantir"),
    ("SNOW", "Snowflake"),
    ("UBER", "Uber Technologies"),
    ("LYFT", "Lyft"),
    ("ABNB", "Airbnb"),
    ("NFLX", "Netflix"),
    ("DIS", "Disney"),
    ("CMCSA", "Comcast"),
    ("ROKU", "Roku"),
    ("SNAP", "Snap Inc"),
    ("SPOT", "Spotify"),
    ("SHOP", "Shopify"),
    ("PYPL", "PayPal"),
    ("SQ", "Block Inc"),
    ("COIN", "Coinbase"),
    ("HOOD", "Robinhood"),
    ("V", "Visa Inc"),
    ("MA", "Mastercard"),
    ("AXP", "American Express"),
    ("JPM", "JPMorgan"),
    ("BAC", "Bank of America"),
    ("WFC", "Wells Fargo"),
    ("C", "Citigroup"),
    ("GS", "Goldman Sachs"),
    ("MS", "Morgan Stanley"),
    ("SCHW", "Charles Schwab"),
    ("BLK", "BlackRock"),
    ("USB", "U.S. Bancorp"),
    ("PNC", "PNC Financial"),
    ("COF", "Capital One"),
    ("KEY", "KeyCorp"),
    ("SPGI", "S&P Global"),
    ("MCO", "Moody's"),
    ("ICE", "Intercontinental Exchange"),
    ("CME", "CME Group"),
    ("CB", "Chubb"),
    ("ALL", "Allstate"),
    ("MMC", "Marsh McLennan"),
    ("UNH", "UnitedHealth"),
    ("JNJ", "Johnson & Johnson"),
    ("LLY", "Eli Lilly"),
    ("PFE", "Pfizer"),
    ("MRK", "Merck"),
    ("ABBV", "AbbVie"),
    ("TMO", "Thermo Fisher"),
    ("AMGN", "Amgen"),
    ("GILD", "Gilead"),
    ("BMY", "Bristol-Myers Squibb"),
    ("VRTX", "Vertex Pharmaceuticals"),
    ("REGN", "Regeneron"),
    ("ISRG", "Intuitive Surgical"),
    ("SYK", "Stryker"),
    ("BSX", "Boston Scientific"),
    ("ZTS", "Zoetis"),
    ("CI", "Cigna"),
    ("MRNA", "Moderna"),
    ("XOM", "Exxon Mobil"),
    ("CVX", "Chevron"),
    ("COP", "ConocoPhillips"),
    ("OXY", "Occidental Petroleum"),
    ("NEE", "NextEra Energy"),
    ("DUK", "Duke Energy"),
    ("SO", "Southern Company"),
    ("WMT", "Walmart"),
    ("COST", "Costco"),
    ("TGT", "Target Corporation"),
    ("HD", "Home Depot"),
    ("LOW", "Lowe's"),
    ("MCD", "McDonald's"),
    ("SBUX", "Starbucks"),
    ("CMG", "Chipotle"),
    ("NKE", "Nike"),
    ("KO", "Coca-Cola"),
    ("PEP", "PepsiCo"),
    ("PG", "Procter & Gamble"),
    ("CL", "Colgate-Palmolive"),
    ("MDLZ", "Mondelez"),
    ("PM", "Philip Morris"),
    ("MO", "Altria"),
    ("ORLY", "O'Reilly Automotive"),
    ("BKNG", "Booking Holdings"),
    ("F", "Ford Motor"),
    ("GM", "General Motors"),
    ("RIVN", "Rivian"),
    ("BA", "Boeing"),
    ("CAT", "Caterpillar"),
    ("DE", "Deere"),
    ("HON", "Honeywell"),
    ("GE", "General Electric"),
    ("LMT", "Lockheed Martin"),
    ("NOC", "Northrop Grumman"),
    ("GD", "General Dynamics"),
    ("RTX", "RTX Corporation"),
    ("UNP", "Union Pacific"),
    ("NSC", "Norfolk Southern"),
    ("UPS", "United Parcel Service"),
    ("FDX", "FedEx"),
    ("EMR", "Emerson Electric"),
    ("ETN", "Eaton"),
    ("MMM", "3M"),
    ("T", "AT&T"),
    ("VZ", "Verizon"),
    ("TMUS", "T-Mobile"),
    ("CHTR", "Charter Communications"),
    ("WBD", "Warner Bros. Discovery"),
    ("PARA", "Paramount Global"),
    ("ACN", "Accenture"),
    ("APD", "Air Products"),
    ("SHW", "Sherwin-Williams"),
    ("PLD", "Prologis"),
    ("WM", "Waste Management"),
    ("ARM", "Arm Holdings"),
    ("SMCI", "Super Micro Computer"),
    ("DELL", "Dell Technologies"),
    ("HPQ", "HP Inc"),
    ("EBAY", "eBay"),
    ("ETSY", "Etsy"),
    ("ZM", "Zoom Video"),
    ("DOCU", "DocuSign"),
    ("DKNG", "DraftKings"),
    ("GME", "GameStop"),
    ("AMC", "AMC Entertainment"),
    ("RDDT", "Reddit"),
    ("CAKE", "Cheesecake Factory"),
    ("EAT", "Brinker International"),
    ("FAST", "Fastenal"),
    ("HAS", "Hasbro"),
    ("PLAY", "Dave & Buster's"),
    ("TEAM", "Atlassian"),
    ("ARE", "Alexandria Real Estate"),
    ("BEN", "Franklin Resources"),
    ("CAR", "Avis Budget"),
    ("ON", "ON Semiconductor"),
    ("IT", "Gartner"),
    ("AI", "C3.ai"),
    ("FIVE", "Five Below"),
];

/// Valid tickers that are also everyday words or acronyms.
const AMBIGUOUS: &[&str] = &[
    "ALL", "ARE", "BEN", "CAKE", "CAR", "CAT", "COST", "EAT", "FAST", "FIVE", "HAS", "IT", "KEY",
    "LOW", "NOW", "ON", "PLAY", "SNAP", "SO", "TEAM", "AI", "SPOT", "SHOP", "HOOD", "ARM", "COIN",
    "ICE", "DE", "MA", "MO",
];

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: HashMap<String, String>,
    ambiguous: HashSet<String>,
    /// (lowercase company name, symbol), sorted by symbol
    name_index: Vec<(String, String)>,
}

fn is_valid_symbol(symbol: &str) -> bool {
    (1..=5).contains(&symbol.len()) && symbol.chars().all(|c| c.is_ascii_uppercase())
}

impl SymbolTable {
    /// Build a table; symbols must be 1-5 uppercase ASCII letters and unique.
    pub fn from_entries<S, N, A>(
        entries: impl IntoIterator<Item = (S, N)>,
        ambiguous: impl IntoIterator<Item = A>,
    ) -> Result<Self, AnalysisError>
    where
        S: Into<String>,
        N: Into<String>,
        A: Into<String>,
    {
        let mut names = HashMap::new();
        for (symbol, name) in entries {
            let symbol = symbol.into();
            if !is_valid_symbol(&symbol) {
                return Err(AnalysisError::InvalidData(format!("invalid ticker symbol '{}'", symbol)));
            }
            if names.contains_key(&symbol) {
                return Err(AnalysisError::InvalidData(format!("duplicate ticker symbol '{}'", symbol)));
            }
            names.insert(symbol, name.into());
        }

        let mut name_index: Vec<(String, String)> = names
            .iter()
            .map(|(symbol, name)| (name.to_lowercase(), symbol.clone()))
            .collect();
        name_index.sort_by(|a, b| a.1.cmp(&b.1));

        Ok(Self {
            names,
            ambiguous: ambiguous.into_iter().map(Into::into).collect(),
            name_index,
        })
    }

    /// Built-in table of large US listings. A broken built-in table is logged
    /// and yields an empty table.
    pub fn default_us() -> Self {
        match Self::from_entries(US_EQUITIES.iter().copied(), AMBIGUOUS.iter().copied()) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("Built-in symbol table is invalid: {}", e);
                Self::default()
            }
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.names.contains_key(symbol)
    }

    pub fn company_name(&self, symbol: &str) -> Option<&str> {
        self.names.get(symbol).map(String::as_str)
    }

    pub fn is_ambiguous(&self, symbol: &str) -> bool {
        self.ambiguous.contains(symbol)
    }

    /// Lowercased company names with their symbols
    pub fn names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.name_index.iter().map(|(name, symbol)| (name.as_str(), symbol.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

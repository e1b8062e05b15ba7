//! Ticker symbol extraction from headlines and descriptions.
//!
//! Three independent tiers are unioned:
//! 1. `$CASHTAG` matches present in the symbol table (no filtering)
//! 2. bare 2-5 letter uppercase words, minus false positives and ambiguous symbols
//! 3. case-insensitive company name search (names of 4+ characters)

use analysis_core::Article;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub mod filters;
pub mod symbols;

pub use filters::is_false_positive;
pub use symbols::SymbolTable;

static CASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Z]{1,5})\b").expect("cashtag pattern is valid"));
static UPPER_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,5})\b").expect("uppercase word pattern is valid"));

const MIN_COMPANY_NAME_LEN: usize = 4;

pub struct TickerExtractor {
    table: SymbolTable,
}

impl TickerExtractor {
    pub fn new(table: SymbolTable) -> Self {
        Self { table }
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Extract the set of symbols mentioned in `text`. Empty for empty input.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if text.is_empty() {
            return found;
        }

        self.cashtag_tier(text, &mut found);
        self.uppercase_tier(text, &mut found);
        self.company_name_tier(text, &mut found);

        found
    }

    fn cashtag_tier(&self, text: &str, found: &mut BTreeSet<String>) {
        for caps in CASHTAG_RE.captures_iter(text) {
            let symbol = &caps[1];
            if self.table.contains(symbol) {
                found.insert(symbol.to_string());
            }
        }
    }

    fn uppercase_tier(&self, text: &str, found: &mut BTreeSet<String>) {
        for caps in UPPER_WORD_RE.captures_iter(text) {
            let word = &caps[1];
            if is_false_positive(word) || self.table.is_ambiguous(word) {
                continue;
            }
            if self.table.contains(word) {
                found.insert(word.to_string());
            }
        }
    }

    fn company_name_tier(&self, text: &str, found: &mut BTreeSet<String>) {
        let text_lower = text.to_lowercase();
        for (name, symbol) in self.table.names() {
            if name.chars().count() >= MIN_COMPANY_NAME_LEN && text_lower.contains(name) {
                found.insert(symbol.to_string());
            }
        }
    }

    /// Fill `tickers` on every article and return the union across all of them.
    pub fn annotate_articles(&self, articles: &mut [Article]) -> BTreeSet<String> {
        let mut all = BTreeSet::new();
        for article in articles.iter_mut() {
            let tickers = self.extract(&article.text());
            all.extend(tickers.iter().cloned());
            article.tickers = tickers.into_iter().collect();
        }
        tracing::debug!(articles = articles.len(), tickers = all.len(), "annotated articles with tickers");
        all
    }
}

impl Default for TickerExtractor {
    fn default() -> Self {
        Self::new(SymbolTable::default_us())
    }
}

//! Tolerant line-item lookup over statement tables.
//!
//! Filers label the same concept differently ("Revenue", "Total net sales",
//! "Net revenues"), so each target field carries an ordered list of keyword
//! alternatives matched as case-insensitive substrings of row labels.

use analysis_core::StatementTable;

/// Value of the first row whose label contains `keyword`, at `period_idx`.
pub fn lookup_value(table: &StatementTable, keyword: &str, period_idx: usize) -> Option<f64> {
    let keyword = keyword.to_lowercase();
    table
        .rows
        .iter()
        .find(|row| row.label.to_lowercase().contains(&keyword))
        .and_then(|row| row.value_at(period_idx))
        .filter(|v| v.is_finite())
}

/// Try each keyword in priority order; first non-null value wins.
pub fn search_value(table: Option<&StatementTable>, keywords: &[&str], period_idx: usize) -> Option<f64> {
    let table = table?;
    keywords
        .iter()
        .find_map(|kw| lookup_value(table, kw, period_idx))
}

pub const REVENUE: &[&str] = &["revenue", "net revenue", "total revenue", "sales"];
pub const COST_OF_REVENUE: &[&str] = &["cost of revenue", "cost of goods", "cost of sales"];
pub const GROSS_PROFIT: &[&str] = &["gross profit"];
pub const OPERATING_INCOME: &[&str] = &["operating income", "income from operations"];
pub const NET_INCOME: &[&str] = &["net income", "net earnings"];
pub const EBITDA: &[&str] = &["ebitda"];
pub const EPS: &[&str] = &["earnings per share", "basic eps", "diluted eps"];
pub const INTEREST_EXPENSE: &[&str] = &["interest expense"];
pub const TAX_EXPENSE: &[&str] = &["income tax", "tax expense", "provision for income tax"];

pub const TOTAL_ASSETS: &[&str] = &["total assets"];
pub const TOTAL_LIABILITIES: &[&str] = &["total liabilities"];
pub const TOTAL_EQUITY: &[&str] = &[
    "total equity",
    "stockholders equity",
    "shareholders equity",
    "total stockholders",
];
pub const CURRENT_ASSETS: &[&str] = &["total current assets", "current assets"];
pub const CURRENT_LIABILITIES: &[&str] = &["total current liabilities", "current liabilities"];
pub const LONG_TERM_DEBT: &[&str] = &["long-term debt", "long term debt"];
pub const TOTAL_DEBT: &[&str] = &["total debt"];
pub const CASH: &[&str] = &["cash and cash equivalents", "cash and equivalents"];
pub const INVENTORY: &[&str] = &["inventory", "inventories"];
pub const ACCOUNTS_RECEIVABLE: &[&str] = &["accounts receivable", "receivables"];

pub const OPERATING_CASHFLOW: &[&str] = &[
    "operating",
    "cash from operations",
    "net cash provided by operating",
];
pub const CAPEX: &[&str] = &[
    "capital expenditure",
    "purchase of property",
    "payments for property",
];
pub const DIVIDENDS_PAID: &[&str] = &["dividends paid", "payment of dividends"];

#[cfg(test)]
mod tests {
    use super::*;

    fn income() -> StatementTable {
        StatementTable::new(["2024", "2023"])
            .row("Total Net Sales", &[Some(500.0), Some(400.0)])
            .row("Net Revenue", &[None, Some(390.0)])
            .row("Net Income", &[Some(50.0), Some(f64::NAN)])
    }

    #[test]
    fn test_lookup_is_case_insensitive_substring() {
        let table = income();
        assert_eq!(lookup_value(&table, "NET SALES", 0), Some(500.0));
        assert_eq!(lookup_value(&table, "sales", 1), Some(400.0));
        assert_eq!(lookup_value(&table, "ebitda", 0), None);
    }

    #[test]
    fn test_search_falls_back_to_next_keyword() {
        let table = income();
        // "revenue" row exists but has no current value, so "sales" supplies it
        assert_eq!(search_value(Some(&table), REVENUE, 0), Some(500.0));
        assert_eq!(search_value(Some(&table), REVENUE, 1), Some(390.0));
    }

    #[test]
    fn test_missing_table_or_period() {
        assert_eq!(search_value(None, REVENUE, 0), None);
        assert_eq!(search_value(Some(&income()), REVENUE, 5), None);
    }

    #[test]
    fn test_non_finite_values_are_missing() {
        assert_eq!(search_value(Some(&income()), NET_INCOME, 1), None);
    }
}

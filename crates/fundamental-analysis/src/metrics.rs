use analysis_core::{round_to, FinancialStatements};
use serde::{Deserialize, Serialize};

use crate::resolver::{self, search_value};

/// Normalized metrics for one filing. Every field is `None` when its inputs
/// are missing or a denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    // Income statement
    pub revenue: Option<f64>,
    pub cost_of_revenue: Option<f64>,
    pub gross_profit: Option<f64>,
    pub operating_income: Option<f64>,
    pub net_income: Option<f64>,
    pub ebitda: Option<f64>,
    pub eps: Option<f64>,
    pub interest_expense: Option<f64>,
    pub tax_expense: Option<f64>,
    // Margins (%)
    pub gross_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub net_margin: Option<f64>,
    // Balance sheet
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub total_equity: Option<f64>,
    pub current_assets: Option<f64>,
    pub current_liabilities: Option<f64>,
    pub long_term_debt: Option<f64>,
    pub total_debt: Option<f64>,
    pub cash: Option<f64>,
    pub inventory: Option<f64>,
    pub accounts_receivable: Option<f64>,
    // Ratios
    pub current_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub asset_turnover: Option<f64>,
    pub interest_coverage: Option<f64>,
    // Cash flow
    pub operating_cashflow: Option<f64>,
    pub capex: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub dividends_paid: Option<f64>,
    // Growth (%), period 0 vs period 1
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    // Needs a market price, see `with_price`
    pub pe_ratio: Option<f64>,
}

impl MetricSet {
    /// Flat name -> value view, in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("revenue", self.revenue),
            ("cost_of_revenue", self.cost_of_revenue),
            ("gross_profit", self.gross_profit),
            ("operating_income", self.operating_income),
            ("net_income", self.net_income),
            ("ebitda", self.ebitda),
            ("eps", self.eps),
            ("interest_expense", self.interest_expense),
            ("tax_expense", self.tax_expense),
            ("gross_margin", self.gross_margin),
            ("operating_margin", self.operating_margin),
            ("net_margin", self.net_margin),
            ("total_assets", self.total_assets),
            ("total_liabilities", self.total_liabilities),
            ("total_equity", self.total_equity),
            ("current_assets", self.current_assets),
            ("current_liabilities", self.current_liabilities),
            ("long_term_debt", self.long_term_debt),
            ("total_debt", self.total_debt),
            ("cash", self.cash),
            ("inventory", self.inventory),
            ("accounts_receivable", self.accounts_receivable),
            ("current_ratio", self.current_ratio),
            ("debt_to_equity", self.debt_to_equity),
            ("roe", self.roe),
            ("roa", self.roa),
            ("asset_turnover", self.asset_turnover),
            ("interest_coverage", self.interest_coverage),
            ("operating_cashflow", self.operating_cashflow),
            ("capex", self.capex),
            ("free_cash_flow", self.free_cash_flow),
            ("dividends_paid", self.dividends_paid),
            ("revenue_growth", self.revenue_growth),
            ("earnings_growth", self.earnings_growth),
            ("pe_ratio", self.pe_ratio),
        ]
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries()
            .into_iter()
            .find(|(key, _)| *key == name)
            .and_then(|(_, value)| value)
    }

    pub fn populated(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Fill `pe_ratio` from a market price; only meaningful for positive EPS.
    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.pe_ratio = match (price, self.eps) {
            (Some(p), Some(eps)) if p > 0.0 && eps > 0.0 => finite(round_to(p / eps, 2)),
            _ => None,
        };
        self
    }
}

fn finite(v: f64) -> Option<f64> {
    Some(v).filter(|v| v.is_finite())
}

fn safe_div(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) if b != 0.0 => finite(a / b),
        _ => None,
    }
}

fn safe_ratio(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    safe_div(a, b).and_then(|v| finite(round_to(v, 2)))
}

fn safe_pct(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    safe_div(a, b).and_then(|v| finite(round_to(v * 100.0, 2)))
}

fn safe_growth(new: Option<f64>, old: Option<f64>) -> Option<f64> {
    match (new, old) {
        (Some(new), Some(old)) if old != 0.0 => finite(round_to((new - old) / old.abs() * 100.0, 2)),
        _ => None,
    }
}

fn non_zero(v: Option<f64>) -> Option<f64> {
    v.filter(|x| *x != 0.0)
}

/// Derives a `MetricSet` from whatever statements a filing provides.
pub struct MetricEngine;

impl MetricEngine {
    pub fn new() -> Self {
        Self
    }

    /// Total over its input: missing statements or rows only produce `None`s.
    pub fn derive(&self, statements: &FinancialStatements) -> MetricSet {
        let income = statements.income.as_ref();
        let balance = statements.balance.as_ref();
        let cashflow = statements.cashflow.as_ref();

        let mut m = MetricSet {
            revenue: search_value(income, resolver::REVENUE, 0),
            cost_of_revenue: search_value(income, resolver::COST_OF_REVENUE, 0),
            gross_profit: search_value(income, resolver::GROSS_PROFIT, 0),
            operating_income: search_value(income, resolver::OPERATING_INCOME, 0),
            net_income: search_value(income, resolver::NET_INCOME, 0),
            ebitda: search_value(income, resolver::EBITDA, 0),
            eps: search_value(income, resolver::EPS, 0),
            interest_expense: search_value(income, resolver::INTEREST_EXPENSE, 0),
            tax_expense: search_value(income, resolver::TAX_EXPENSE, 0),
            total_assets: search_value(balance, resolver::TOTAL_ASSETS, 0),
            total_liabilities: search_value(balance, resolver::TOTAL_LIABILITIES, 0),
            total_equity: search_value(balance, resolver::TOTAL_EQUITY, 0),
            current_assets: search_value(balance, resolver::CURRENT_ASSETS, 0),
            current_liabilities: search_value(balance, resolver::CURRENT_LIABILITIES, 0),
            long_term_debt: search_value(balance, resolver::LONG_TERM_DEBT, 0),
            total_debt: search_value(balance, resolver::TOTAL_DEBT, 0),
            cash: search_value(balance, resolver::CASH, 0),
            inventory: search_value(balance, resolver::INVENTORY, 0),
            accounts_receivable: search_value(balance, resolver::ACCOUNTS_RECEIVABLE, 0),
            operating_cashflow: search_value(cashflow, resolver::OPERATING_CASHFLOW, 0),
            capex: search_value(cashflow, resolver::CAPEX, 0),
            dividends_paid: search_value(cashflow, resolver::DIVIDENDS_PAID, 0),
            ..Default::default()
        };

        if m.gross_profit.is_none() {
            if let (Some(revenue), Some(cost)) = (m.revenue, m.cost_of_revenue) {
                m.gross_profit = finite(revenue - cost);
            }
        }

        m.gross_margin = safe_pct(m.gross_profit, m.revenue);
        m.operating_margin = safe_pct(m.operating_income, m.revenue);
        m.net_margin = safe_pct(m.net_income, m.revenue);

        m.current_ratio = safe_ratio(m.current_assets, m.current_liabilities);
        let debt = non_zero(m.total_debt)
            .or(non_zero(m.long_term_debt))
            .unwrap_or(0.0);
        m.debt_to_equity = safe_ratio(Some(debt), m.total_equity);
        m.roe = safe_pct(m.net_income, m.total_equity);
        m.roa = safe_pct(m.net_income, m.total_assets);
        m.asset_turnover = safe_ratio(m.revenue, m.total_assets);
        m.interest_coverage = safe_ratio(m.operating_income, m.interest_expense.map(f64::abs));

        m.free_cash_flow = match (m.operating_cashflow, m.capex) {
            (Some(ocf), Some(capex)) => finite(ocf - capex.abs()),
            _ => None,
        };

        let revenue_prev = search_value(income, resolver::REVENUE, 1);
        let net_income_prev = search_value(income, resolver::NET_INCOME, 1);
        m.revenue_growth = safe_growth(m.revenue, revenue_prev);
        m.earnings_growth = safe_growth(m.net_income, net_income_prev);

        m
    }
}

impl Default for MetricEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::StatementTable;

    fn full_statements() -> FinancialStatements {
        FinancialStatements {
            company: Some("Example Corp".to_string()),
            income: Some(
                StatementTable::new(["FY2024", "FY2023"])
                    .row("Total revenue", &[Some(1000.0), Some(800.0)])
                    .row("Cost of revenue", &[Some(400.0), Some(350.0)])
                    .row("Operating income", &[Some(250.0), Some(200.0)])
                    .row("Interest expense", &[Some(-25.0), Some(-20.0)])
                    .row("Net income", &[Some(150.0), Some(-50.0)])
                    .row("Diluted EPS", &[Some(3.0), Some(-1.0)]),
            ),
            balance: Some(
                StatementTable::new(["FY2024"])
                    .row("Total current assets", &[Some(600.0)])
                    .row("Total current liabilities", &[Some(300.0)])
                    .row("Total assets", &[Some(2000.0)])
                    .row("Long-term debt", &[Some(500.0)])
                    .row("Total liabilities", &[Some(1000.0)])
                    .row("Total stockholders' equity", &[Some(1000.0)]),
            ),
            cashflow: Some(
                StatementTable::new(["FY2024"])
                    .row("Net cash provided by operating activities", &[Some(300.0)])
                    .row("Payments for property, plant and equipment", &[Some(-120.0)])
                    .row("Dividends paid", &[Some(-40.0)]),
            ),
        }
    }

    #[test]
    fn test_all_statements_absent_gives_all_null() {
        let metrics = MetricEngine::new().derive(&FinancialStatements::default());
        assert_eq!(metrics.populated(), 0);
        assert!(metrics.entries().iter().all(|(_, v)| v.is_none()));
        assert_eq!(metrics.entries().len(), 35);
    }

    #[test]
    fn test_gross_profit_falls_back_to_revenue_minus_cost() {
        let statements = FinancialStatements {
            income: Some(
                StatementTable::new(["FY2024"])
                    .row("Revenue", &[Some(1000.0)])
                    .row("Cost of revenue", &[Some(400.0)]),
            ),
            ..Default::default()
        };
        let metrics = MetricEngine::new().derive(&statements);
        assert_eq!(metrics.gross_profit, Some(600.0));
        assert_eq!(metrics.gross_margin, Some(60.0));
        assert_eq!(metrics.operating_margin, None);
    }

    #[test]
    fn test_full_derivation() {
        let m = MetricEngine::new().derive(&full_statements());

        assert_eq!(m.revenue, Some(1000.0));
        assert_eq!(m.gross_profit, Some(600.0));
        assert_eq!(m.operating_margin, Some(25.0));
        assert_eq!(m.net_margin, Some(15.0));
        assert_eq!(m.current_ratio, Some(2.0));
        assert_eq!(m.debt_to_equity, Some(0.5));
        assert_eq!(m.roe, Some(15.0));
        assert_eq!(m.roa, Some(7.5));
        assert_eq!(m.asset_turnover, Some(0.5));
        assert_eq!(m.interest_coverage, Some(10.0));
        assert_eq!(m.operating_cashflow, Some(300.0));
        assert_eq!(m.free_cash_flow, Some(180.0));
        assert_eq!(m.dividends_paid, Some(-40.0));
        assert_eq!(m.revenue_growth, Some(25.0));
        // -50 -> 150 measured against |old|
        assert_eq!(m.earnings_growth, Some(400.0));
        assert_eq!(m.pe_ratio, None);
    }

    #[test]
    fn test_zero_denominators_resolve_to_null() {
        let statements = FinancialStatements {
            income: Some(
                StatementTable::new(["FY2024", "FY2023"])
                    .row("Revenue", &[Some(0.0), Some(0.0)])
                    .row("Operating income", &[Some(10.0), None])
                    .row("Interest expense", &[Some(0.0), None]),
            ),
            balance: Some(
                StatementTable::new(["FY2024"])
                    .row("Total current assets", &[Some(10.0)])
                    .row("Total current liabilities", &[Some(0.0)])
                    .row("Total equity", &[Some(0.0)]),
            ),
            ..Default::default()
        };
        let m = MetricEngine::new().derive(&statements);
        assert_eq!(m.gross_margin, None);
        assert_eq!(m.operating_margin, None);
        assert_eq!(m.current_ratio, None);
        assert_eq!(m.debt_to_equity, None);
        assert_eq!(m.interest_coverage, None);
        assert_eq!(m.revenue_growth, None);
        assert!(m.entries().iter().all(|(_, v)| v.map_or(true, f64::is_finite)));
    }

    #[test]
    fn test_extreme_inputs_never_produce_infinity() {
        let statements = FinancialStatements {
            income: Some(
                StatementTable::new(["FY2024", "FY2023"])
                    .row("Revenue", &[Some(1e307), Some(-1e-300)])
                    .row("Cost of revenue", &[Some(-1.7e308), None])
                    .row("Net income", &[Some(1e307), Some(1e-300)]),
            ),
            balance: Some(
                StatementTable::new(["FY2024"])
                    .row("Total assets", &[Some(0.5)])
                    .row("Total equity", &[Some(1.0)]),
            ),
            cashflow: Some(
                StatementTable::new(["FY2024"])
                    .row("Cash from operations", &[Some(-1.7e308)])
                    .row("Capital expenditures", &[Some(1.7e308)]),
            ),
            ..Default::default()
        };
        let m = MetricEngine::new().derive(&statements);

        let non_finite: Vec<_> = m
            .entries()
            .into_iter()
            .filter(|(_, v)| v.map_or(false, |v| !v.is_finite()))
            .collect();
        assert!(non_finite.is_empty(), "non-finite metrics: {:?}", non_finite);
        assert_eq!(m.roe, None);
        assert_eq!(m.roa, None);
        // too large to round, but still finite
        assert_eq!(m.asset_turnover, Some(2e307));
        assert_eq!(m.net_margin, Some(100.0));
        assert_eq!(m.gross_profit, None);
        assert_eq!(m.free_cash_flow, None);
        assert_eq!(m.revenue_growth, None);
        assert_eq!(m.net_income, Some(1e307));
    }

    #[test]
    fn test_debt_to_equity_without_debt_rows_is_zero() {
        let statements = FinancialStatements {
            balance: Some(StatementTable::new(["FY2024"]).row("Total equity", &[Some(250.0)])),
            ..Default::default()
        };
        let m = MetricEngine::new().derive(&statements);
        assert_eq!(m.debt_to_equity, Some(0.0));
    }

    #[test]
    fn test_free_cash_flow_needs_both_operands() {
        let statements = FinancialStatements {
            cashflow: Some(StatementTable::new(["FY2024"]).row("Cash from operations", &[Some(90.0)])),
            ..Default::default()
        };
        let m = MetricEngine::new().derive(&statements);
        assert_eq!(m.operating_cashflow, Some(90.0));
        assert_eq!(m.free_cash_flow, None);
    }

    #[test]
    fn test_with_price_sets_pe() {
        let m = MetricEngine::new().derive(&full_statements());
        assert_eq!(m.clone().with_price(Some(45.0)).pe_ratio, Some(15.0));
        assert_eq!(m.clone().with_price(None).pe_ratio, None);
        assert_eq!(m.get("pe_ratio"), None);
        assert_eq!(m.get("roe"), Some(15.0));
    }

    #[test]
    fn test_metric_set_serializes_nulls() {
        let m = MetricEngine::new().derive(&FinancialStatements::default());
        let json = serde_json::to_value(&m).unwrap();
        assert!(json["gross_margin"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 35);
    }
}

use async_trait::async_trait;
use crate::{
    AnalysisError, Article, FinancialStatements, FundamentalSnapshot, InsiderFiling,
    MacroObservation, OracleVerdict, QuoteData,
};

/// News search collaborator
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn search(&self, query: &str, freshness: &str, count: u32) -> Result<Vec<Article>, AnalysisError>;
}

/// Quote collaborator (last price + previous close)
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(&self, ticker: &str) -> Result<QuoteData, AnalysisError>;
}

/// Filings collaborator supplying the latest annual statements
#[async_trait]
pub trait StatementSource: Send + Sync {
    async fn latest_statements(&self, ticker: &str) -> Result<FinancialStatements, AnalysisError>;
}

/// Filings collaborator supplying Form 4 filings, most recent first
#[async_trait]
pub trait InsiderFilingSource: Send + Sync {
    async fn insider_filings(&self, ticker: &str) -> Result<Vec<InsiderFiling>, AnalysisError>;
}

/// Fundamentals collaborator used by the screener
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self, ticker: &str) -> Result<FundamentalSnapshot, AnalysisError>;
}

/// Macroeconomic series collaborator, observations oldest first
#[async_trait]
pub trait MacroSource: Send + Sync {
    fn is_configured(&self) -> bool {
        true
    }

    async fn series(&self, series_id: &str) -> Result<Vec<MacroObservation>, AnalysisError>;
}

/// Higher-fidelity (LLM-backed) sentiment collaborator
#[async_trait]
pub trait SentimentOracle: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    async fn classify(&self, text: &str) -> Result<OracleVerdict, AnalysisError>;
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A collaborator fetch failed for one entity (ticker, query, series).
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AnalysisError::ApiError("timeout".to_string()).to_string(), "API error: timeout");
        assert_eq!(
            AnalysisError::NotConfigured("FRED_API_KEY".to_string()).to_string(),
            "Not configured: FRED_API_KEY"
        );
    }
}

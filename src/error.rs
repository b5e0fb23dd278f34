//! Error types for the competitive analysis engine.
//!
//! This module provides structured error handling with:
//! - `AnalysisError`: domain-specific errors raised while comparing two sites
//! - `Result<T>`: type alias for Results using AnalysisError

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for a comparison run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A page record carries a value no profiler can work with
    #[error("Invalid page record {url}: {reason}")]
    InvalidPage { url: String, reason: String },

    /// The model-backed insight strategy was selected without credentials
    #[error("API key missing: configure GEMINI_API_KEY to enable AI insights")]
    MissingApiKey,

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A model answer could not be turned into insights
    #[error("Parse error: {0}")]
    ParseError(String),

    /// External service error (Gemini, etc.)
    #[error("Service error ({service}): {message}")]
    ServiceError { service: &'static str, message: String },

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AnalysisError {
    /// Create an invalid page error
    pub fn invalid_page(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPage {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a service error
    pub fn service(service: &'static str, msg: impl Into<String>) -> Self {
        Self::ServiceError {
            service,
            message: msg.into(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(error: reqwest::Error) -> Self {
        Self::NetworkError(error.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}

/// Result type alias using AnalysisError.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_names_the_service() {
        let err = AnalysisError::service("gemini", "quota exceeded");
        assert_eq!(err.to_string(), "Service error (gemini): quota exceeded");
    }

    #[test]
    fn invalid_page_mentions_url() {
        let err = AnalysisError::invalid_page("https://example.com/a", "load time is NaN");
        assert!(err.to_string().contains("https://example.com/a"));
    }

    #[test]
    fn anyhow_errors_convert() {
        let err: AnalysisError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AnalysisError::Other(_)));
    }
}

// =================================================================
// source/errors.rs - Error Types
// =================================================================

use screener_common::DataError;
use thiserror::Error;

/// Error types for data source operations
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Data source API error: {0}")]
    ApiError(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Data parsing error: {0}")]
    ParseError(String),

    #[error("Invalid series: {0}")]
    Data(#[from] DataError),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::ParseError(err.to_string())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::NetworkError(err.to_string())
        } else {
            SourceError::ApiError(err.to_string())
        }
    }
}

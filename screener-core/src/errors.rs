use screener_common::DataError;
use thiserror::Error;

/// Why a symbol produced no usable series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unavailable {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("only {len} bars, at least {required} required")]
    TooShort { len: usize, required: usize },

    #[error("malformed series: {0}")]
    Malformed(String),
}

/// Errors surfaced by the screener core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenerError {
    #[error("No data for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: Unavailable },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task error: {0}")]
    Task(String),
}

impl ScreenerError {
    pub fn unavailable(symbol: impl Into<String>, reason: Unavailable) -> Self {
        ScreenerError::DataUnavailable {
            symbol: symbol.into(),
            reason,
        }
    }

    /// Missing data is expected during a scan; everything else points at a bug or bad setup
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScreenerError::DataUnavailable { .. } => true,
            ScreenerError::Task(_) => true,
            ScreenerError::InvalidInput(_) => false,
            ScreenerError::Config(_) => false,
        }
    }
}

impl From<DataError> for ScreenerError {
    fn from(err: DataError) -> Self {
        let symbol = match &err {
            DataError::OutOfOrder { symbol, .. } => symbol.clone(),
            DataError::NonPositivePrice { symbol, .. } => symbol.clone(),
            DataError::InvalidSymbol(symbol) => symbol.clone(),
        };
        ScreenerError::unavailable(symbol, Unavailable::Malformed(err.to_string()))
    }
}

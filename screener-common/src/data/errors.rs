use chrono::NaiveDate;
use thiserror::Error;

/// Validation errors raised while assembling market data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Bars out of order for {symbol}: {previous} is not before {current}")]
    OutOfOrder {
        symbol: String,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Non-positive price for {symbol} on {date}")]
    NonPositivePrice { symbol: String, date: NaiveDate },

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),
}

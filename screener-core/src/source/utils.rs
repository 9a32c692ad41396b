// =================================================================
// source/utils.rs - Utility Functions
// =================================================================

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::SourceError;

/// Validate an exchange listing code such as `005930`
pub fn validate_symbol_code(code: &str) -> Result<String, SourceError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(SourceError::InvalidSymbol("Symbol cannot be empty".to_string()));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
        return Err(SourceError::InvalidSymbol(format!(
            "Symbol '{}' contains invalid characters",
            code
        )));
    }

    if code.len() > 16 {
        return Err(SourceError::InvalidSymbol(format!(
            "Symbol '{}' has invalid length",
            code
        )));
    }

    Ok(code.to_uppercase())
}

/// Provider ticker for a listing code, e.g. `005930` + `.KS`
pub fn build_provider_symbol(code: &str, suffix: &str) -> Result<String, SourceError> {
    let code = validate_symbol_code(code)?;
    if suffix.is_empty() || code.ends_with(&suffix.to_uppercase()) {
        Ok(code)
    } else {
        Ok(format!("{}{}", code, suffix.to_uppercase()))
    }
}

/// Price from the provider as a Decimal, rounded to 4 decimal places
pub fn price_to_decimal(value: f64) -> Result<Decimal, SourceError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(4))
        .ok_or_else(|| SourceError::ParseError(format!("Invalid price: {}", value)))
}

/// Trading date of a UTC timestamp at the exchange's local offset
pub fn local_trading_date(timestamp: i64, gmtoffset: i64) -> Result<NaiveDate, SourceError> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| SourceError::ParseError(format!("Invalid timestamp: {}", timestamp)))
}

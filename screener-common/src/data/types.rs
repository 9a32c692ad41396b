use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DataError;

/// One trading day of OHLCV data for a single symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

impl Bar {
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// A bar whose four prices are all `price`
    pub fn flat(date: NaiveDate, price: Decimal, volume: u64) -> Self {
        Self::new(date, price, price, price, price, volume)
    }
}

/// Chronological daily bars for one symbol.
///
/// Construction checks that dates strictly increase and that every price is
/// positive, so downstream arithmetic never divides by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, DataError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(DataError::InvalidSymbol("Symbol cannot be empty".to_string()));
        }

        for bar in &bars {
            let prices = [bar.open, bar.high, bar.low, bar.close];
            if prices.iter().any(|p| *p <= Decimal::ZERO) {
                return Err(DataError::NonPositivePrice {
                    symbol,
                    date: bar.date,
                });
            }
        }

        for pair in bars.windows(2) {
            if pair[0].date >= pair[1].date {
                return Err(DataError::OutOfOrder {
                    symbol,
                    previous: pair[0].date,
                    current: pair[1].date,
                });
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

/// A tradable instrument as listed by the universe provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    pub code: String,
    pub name: String,
}

impl Instrument {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

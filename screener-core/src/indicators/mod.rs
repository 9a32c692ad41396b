//! Indicator engine: moving averages and day-over-day change for a daily series.
//!
//! Every value at index `i` is computed from bars `0..=i` only. Values whose
//! trailing window is not yet full are `None`.

pub mod sma;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ScreenerError, Unavailable};
use screener_common::{Bar, Series};
pub use sma::{calculate_sma, Sma};

pub const SHORT_PERIOD: usize = 5;
pub const MID_PERIOD: usize = 20;
pub const LONG_PERIOD: usize = 60;
pub const VOLUME_PERIOD: usize = 5;

/// Bars required before the long average exists
pub const MIN_HISTORY: usize = LONG_PERIOD;

/// A bar together with the indicators derived from its trailing history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBar {
    pub index: usize,
    pub bar: Bar,
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub vol_ma5: Option<f64>,
    pub change: Option<f64>,
}

impl IndicatorBar {
    /// The fully populated view the classifier works on.
    /// Fails for bars inside the warm-up window.
    pub fn snapshot(&self) -> Result<Snapshot, ScreenerError> {
        let missing = |name: &str| {
            ScreenerError::InvalidInput(format!(
                "{} undefined at index {} ({})",
                name, self.index, self.bar.date
            ))
        };

        Ok(Snapshot {
            index: self.index,
            date: self.bar.date,
            close_price: self.bar.close,
            open: decimal_to_f64(self.bar.open),
            close: decimal_to_f64(self.bar.close),
            volume: self.bar.volume as f64,
            ma20: self.ma20.ok_or_else(|| missing("MA20"))?,
            ma60: self.ma60.ok_or_else(|| missing("MA60"))?,
            vol_ma5: self.vol_ma5.ok_or_else(|| missing("Vol_MA5"))?,
            change: self.change.ok_or_else(|| missing("day change"))?,
        })
    }
}

/// One day's indicator values with every field defined
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub index: usize,
    pub date: NaiveDate,
    /// Exact close, used for price levels
    pub close_price: Decimal,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub vol_ma5: f64,
    pub change: f64,
}

/// A series with indicators attached to every bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub symbol: String,
    pub rows: Vec<IndicatorBar>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorBar> {
        self.rows.get(index)
    }

    pub fn last(&self) -> Option<&IndicatorBar> {
        self.rows.last()
    }
}

/// Reject series too short to carry a 60-period average
pub fn ensure_min_history(series: &Series) -> Result<(), ScreenerError> {
    if series.len() < MIN_HISTORY {
        return Err(ScreenerError::unavailable(
            series.symbol(),
            Unavailable::TooShort {
                len: series.len(),
                required: MIN_HISTORY,
            },
        ));
    }
    Ok(())
}

/// Compute every indicator for every bar of `series`
pub fn compute(series: &Series) -> Result<IndicatorSeries, ScreenerError> {
    let mut ma5 = Sma::new(SHORT_PERIOD)?;
    let mut ma20 = Sma::new(MID_PERIOD)?;
    let mut ma60 = Sma::new(LONG_PERIOD)?;
    let mut vol_ma5 = Sma::new(VOLUME_PERIOD)?;

    let mut rows = Vec::with_capacity(series.len());
    let mut previous_close: Option<Decimal> = None;

    for (index, bar) in series.bars().iter().enumerate() {
        let close = decimal_to_f64(bar.close);
        let change = previous_close.map(|prev| decimal_to_f64((bar.close - prev) / prev));

        rows.push(IndicatorBar {
            index,
            bar: bar.clone(),
            ma5: ma5.next(close),
            ma20: ma20.next(close),
            ma60: ma60.next(close),
            vol_ma5: vol_ma5.next(bar.volume as f64),
            change,
        });

        previous_close = Some(bar.close);
    }

    Ok(IndicatorSeries {
        symbol: series.symbol().to_string(),
        rows,
    })
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flat_series, series_from_closes};

    #[test]
    fn test_indicator_warmup_boundaries() {
        let series = flat_series("005930", 60, 100, 1_000);
        let rows = compute(&series).unwrap();

        assert_eq!(rows.len(), 60);
        assert!(rows.rows[0].change.is_none());
        assert!(rows.rows[1].change.is_some());
        assert!(rows.rows[3].ma5.is_none());
        assert_eq!(rows.rows[4].ma5, Some(100.0));
        assert_eq!(rows.rows[4].vol_ma5, Some(1_000.0));
        assert!(rows.rows[18].ma20.is_none());
        assert_eq!(rows.rows[19].ma20, Some(100.0));
        assert!(rows.rows[58].ma60.is_none());
        assert_eq!(rows.rows[59].ma60, Some(100.0));
    }

    #[test]
    fn test_day_change_is_fractional() {
        let series = series_from_closes("005930", &[100, 110, 99]);
        let rows = compute(&series).unwrap();

        assert_eq!(rows.rows[1].change, Some(0.1));
        assert_eq!(rows.rows[2].change, Some(-0.1));
    }

    #[test]
    fn test_no_lookahead() {
        let mut closes = vec![100; 70];
        let base = compute(&series_from_closes("005930", &closes)).unwrap();

        closes[69] = 500;
        let bumped = compute(&series_from_closes("005930", &closes)).unwrap();

        assert_eq!(base.rows[..69], bumped.rows[..69]);
        assert_ne!(base.rows[69].ma5, bumped.rows[69].ma5);
    }

    #[test]
    fn test_snapshot_requires_long_average() {
        let rows = compute(&flat_series("005930", 60, 100, 1_000)).unwrap();

        assert!(matches!(
            rows.rows[58].snapshot(),
            Err(ScreenerError::InvalidInput(_))
        ));
        let snapshot = rows.rows[59].snapshot().unwrap();
        assert_eq!(snapshot.ma60, 100.0);
        assert_eq!(snapshot.close_price, Decimal::from(100));
    }

    #[test]
    fn test_min_history() {
        let short = flat_series("000660", 59, 100, 1_000);
        let err = ensure_min_history(&short).unwrap_err();
        assert_eq!(
            err,
            ScreenerError::unavailable(
                "000660",
                Unavailable::TooShort {
                    len: 59,
                    required: 60
                }
            )
        );

        assert!(ensure_min_history(&flat_series("000660", 60, 100, 1_000)).is_ok());
    }
}

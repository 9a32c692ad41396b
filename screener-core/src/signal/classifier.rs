use super::setups::{BreakoutSetup, PullbackSetup, Setup};
use super::types::Signal;
use crate::errors::ScreenerError;
use crate::indicators::{IndicatorBar, IndicatorSeries, Snapshot};

/// Evaluation order; the first setup that fires wins
const SETUPS: [&dyn Setup; 2] = [&PullbackSetup, &BreakoutSetup];

pub fn classify_snapshot(snapshot: &Snapshot) -> Result<Signal, ScreenerError> {
    for setup in SETUPS {
        if setup.matches(snapshot) {
            return setup.signal(snapshot);
        }
    }
    Ok(Signal::NoSignal)
}

/// Classify one bar. The bar must have MA60 defined (index 59 or later).
pub fn classify(row: &IndicatorBar) -> Result<Signal, ScreenerError> {
    classify_snapshot(&row.snapshot()?)
}

/// Classify the most recent bar of a series
pub fn classify_latest(series: &IndicatorSeries) -> Result<Signal, ScreenerError> {
    let last = series.last().ok_or_else(|| {
        ScreenerError::InvalidInput(format!("Empty series for {}", series.symbol))
    })?;
    classify(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::compute;
    use crate::signal::{Levels, SetupKind};
    use crate::test_support::{breakout_rows, flat_series, pullback_rows, series_from_ohlcv};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn levels(entry: i64, stop: i64, target: i64) -> Levels {
        Levels {
            entry: Decimal::from(entry),
            stop: Decimal::from(stop),
            target: Decimal::from(target),
        }
    }

    #[test]
    fn test_pullback_example_levels() {
        let snapshot = Snapshot {
            index: 60,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            close_price: Decimal::from(10_100),
            open: 10_050.0,
            close: 10_100.0,
            volume: 900.0,
            ma20: 10_000.0,
            ma60: 9_000.0,
            vol_ma5: 1_000.0,
            change: 0.005,
        };

        assert_eq!(
            classify_snapshot(&snapshot).unwrap(),
            Signal::Pullback(levels(10_100, 10_000, 10_605))
        );
    }

    #[test]
    fn test_pullback_wins_when_both_fire() {
        // Negative volume figures are the only way to meet both volume rules at once
        let snapshot = Snapshot {
            index: 60,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            close_price: Decimal::from(101),
            open: 99.0,
            close: 101.0,
            volume: -12.0,
            ma20: 100.0,
            ma60: 90.0,
            vol_ma5: -10.0,
            change: 0.03,
        };

        assert!(PullbackSetup.matches(&snapshot));
        assert!(BreakoutSetup.matches(&snapshot));

        let signal = classify_snapshot(&snapshot).unwrap();
        assert_eq!(signal.kind(), Some(SetupKind::Pullback));
    }

    #[test]
    fn test_classify_latest_pullback_series() {
        let rows = compute(&series_from_ohlcv("005930", &pullback_rows())).unwrap();

        assert_eq!(
            classify_latest(&rows).unwrap(),
            Signal::Pullback(levels(100, 100, 105))
        );
    }

    #[test]
    fn test_classify_latest_breakout_series() {
        let rows = compute(&series_from_ohlcv("000660", &breakout_rows())).unwrap();

        assert_eq!(
            classify_latest(&rows).unwrap(),
            Signal::Breakout(levels(105, 101, 110))
        );
    }

    #[test]
    fn test_flat_series_has_no_signal() {
        let rows = compute(&flat_series("035420", 80, 100, 1_000)).unwrap();
        assert_eq!(classify_latest(&rows).unwrap(), Signal::NoSignal);
    }

    #[test]
    fn test_empty_series_is_invalid_input() {
        let empty = IndicatorSeries {
            symbol: "035720".to_string(),
            rows: Vec::new(),
        };
        assert!(matches!(
            classify_latest(&empty),
            Err(ScreenerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_warmup_bar_is_invalid_input() {
        let rows = compute(&flat_series("035720", 40, 100, 1_000)).unwrap();
        assert!(matches!(
            classify_latest(&rows),
            Err(ScreenerError::InvalidInput(_))
        ));
    }
}

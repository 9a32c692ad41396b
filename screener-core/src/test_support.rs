use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use screener_common::{Bar, Series};

pub fn day(index: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(index as i64)
}

/// Bars from (open, close, volume) triples; high/low bracket open and close
pub fn series_from_ohlcv(symbol: &str, rows: &[(i64, i64, u64)]) -> Series {
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, &(open, close, volume))| {
            let (open, close) = (Decimal::from(open), Decimal::from(close));
            Bar::new(day(i), open, open.max(close), open.min(close), close, volume)
        })
        .collect();
    Series::new(symbol, bars).unwrap()
}

pub fn series_from_closes(symbol: &str, closes: &[i64]) -> Series {
    let rows: Vec<_> = closes.iter().map(|&c| (c, c, 1_000)).collect();
    series_from_ohlcv(symbol, &rows)
}

pub fn flat_series(symbol: &str, len: usize, price: i64, volume: u64) -> Series {
    let rows = vec![(price, price, volume); len];
    series_from_ohlcv(symbol, &rows)
}

/// 60 bars whose last bar is a quiet pullback to a rising MA20:
/// MA20 = 100, MA60 ≈ 93.3, close = 100, volume 500 under a 900 average
pub fn pullback_rows() -> Vec<(i64, i64, u64)> {
    let mut rows = vec![(90, 90, 1_000); 40];
    rows.extend(vec![(100, 100, 1_000); 19]);
    rows.push((100, 100, 500));
    rows
}

/// 60 bars whose last bar is a green 5% surge on triple volume
pub fn breakout_rows() -> Vec<(i64, i64, u64)> {
    let mut rows = vec![(100, 100, 1_000); 59];
    rows.push((100, 105, 3_000));
    rows
}

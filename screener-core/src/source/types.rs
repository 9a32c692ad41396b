// =================================================================
// source/types.rs - Data Structures
// =================================================================

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Parameters for a daily chart request
#[derive(Debug, Clone)]
pub struct ChartParams {
    pub symbol: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ChartParams {
    pub fn new(symbol: String, lookback_days: u32) -> Self {
        let end_time = Utc::now();
        Self {
            symbol,
            start_time: end_time - Duration::days(i64::from(lookback_days)),
            end_time,
        }
    }

    pub fn with_time_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("period1", self.start_time.timestamp().to_string()),
            ("period2", self.end_time.timestamp().to_string()),
            ("interval", "1d".to_string()),
        ]
    }
}

/// Yahoo v8 chart API response
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    pub result: Option<Vec<ChartData>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub meta: ChartMeta,
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    pub gmtoffset: i64,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<QuoteData>,
}

/// Column-oriented OHLCV; holidays and halted sessions come back as nulls
#[derive(Debug, Deserialize)]
pub struct QuoteData {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_chart_query() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let params = ChartParams::new("005930.KS".to_string(), 365).with_time_range(start, end);

        assert_eq!(
            params.query(),
            vec![
                ("period1", "1704067200".to_string()),
                ("period2", "1706745600".to_string()),
                ("interval", "1d".to_string()),
            ]
        );
    }

    #[test]
    fn test_lookback_window() {
        let params = ChartParams::new("005930.KS".to_string(), 30);
        assert_eq!((params.end_time - params.start_time).num_days(), 30);
    }
}

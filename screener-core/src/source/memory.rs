// =================================================================
// source/memory.rs - In-Memory Data Source
// =================================================================

use async_trait::async_trait;
use screener_common::Series;
use std::collections::HashMap;

use super::{errors::SourceError, traits::DataSource};

enum Entry {
    Series(Series),
    Failure(String),
}

/// Serves preloaded series; used for offline runs and tests.
///
/// The lookback window is ignored and the whole stored series is returned.
#[derive(Default)]
pub struct MemoryDataSource {
    entries: HashMap<String, Entry>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.insert(series);
        self
    }

    /// Make every request for `symbol` fail with a network error
    pub fn with_failure(mut self, symbol: &str, message: &str) -> Self {
        self.entries
            .insert(symbol.to_string(), Entry::Failure(message.to_string()));
        self
    }

    pub fn insert(&mut self, series: Series) {
        self.entries
            .insert(series.symbol().to_string(), Entry::Series(series));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl DataSource for MemoryDataSource {
    async fn get_daily_series(
        &self,
        symbol: &str,
        _lookback_days: u32,
    ) -> Result<Series, SourceError> {
        match self.entries.get(symbol) {
            Some(Entry::Series(series)) => Ok(series.clone()),
            Some(Entry::Failure(message)) => Err(SourceError::NetworkError(message.clone())),
            None => Err(SourceError::SymbolNotFound(symbol.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::flat_series;

    #[tokio::test]
    async fn test_serves_stored_series() {
        let source = MemoryDataSource::new().with_series(flat_series("005930", 10, 100, 1_000));

        let series = source.get_daily_series("005930", 365).await.unwrap();
        assert_eq!(series.len(), 10);
    }

    #[tokio::test]
    async fn test_unknown_and_failing_symbols() {
        let source = MemoryDataSource::new().with_failure("000660", "connection reset");

        assert!(matches!(
            source.get_daily_series("005930", 365).await,
            Err(SourceError::SymbolNotFound(_))
        ));
        assert!(matches!(
            source.get_daily_series("000660", 365).await,
            Err(SourceError::NetworkError(_))
        ));
    }
}

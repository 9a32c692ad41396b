// source/traits.rs

use async_trait::async_trait;
use screener_common::{Instrument, Series};

use super::SourceError;

/// Historical daily bars provider
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Daily bars for `symbol` covering roughly the last `lookback_days` calendar days
    async fn get_daily_series(&self, symbol: &str, lookback_days: u32)
        -> Result<Series, SourceError>;
}

/// Provider of the tradable instrument list
#[async_trait]
pub trait Universe: Send + Sync {
    async fn list_symbols(&self) -> Result<Vec<Instrument>, SourceError>;
}

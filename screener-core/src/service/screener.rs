use std::sync::Arc;
use tracing::info;

use super::{ScanConfig, ScanReport, ScannerService};
use crate::backtest::{BacktestConfig, BacktestEngine, BacktestReport};
use crate::errors::{ScreenerError, Unavailable};
use crate::signal::{create_setup, SetupKind};
use crate::source::{DataSource, Universe};
use screener_common::Instrument;

/// Entry point for the presentation layer: universe listing, scans and backtests
pub struct Screener {
    universe: Arc<dyn Universe>,
    source: Arc<dyn DataSource>,
    scanner: ScannerService,
    backtest_config: BacktestConfig,
}

impl Screener {
    pub fn new(universe: Arc<dyn Universe>, source: Arc<dyn DataSource>) -> Self {
        let scanner = ScannerService::new(Arc::clone(&source));
        Self {
            universe,
            source,
            scanner,
            backtest_config: BacktestConfig::default(),
        }
    }

    pub fn with_scan_config(mut self, config: ScanConfig) -> Self {
        self.scanner = self.scanner.with_config(config);
        self
    }

    pub fn with_backtest_config(mut self, config: BacktestConfig) -> Self {
        self.backtest_config = config;
        self
    }

    pub async fn list_symbols(&self) -> Result<Vec<Instrument>, ScreenerError> {
        self.universe.list_symbols().await.map_err(|e| {
            ScreenerError::unavailable("universe", Unavailable::Fetch(e.to_string()))
        })
    }

    pub async fn scan(&self, instruments: &[Instrument]) -> ScanReport {
        self.scanner.scan(instruments).await
    }

    pub async fn scan_universe(&self) -> Result<ScanReport, ScreenerError> {
        let instruments = self.list_symbols().await?;
        Ok(self.scan(&instruments).await)
    }

    /// Replay `setup` over the symbol's fetched history
    pub async fn backtest(
        &self,
        symbol: &str,
        setup: SetupKind,
    ) -> Result<BacktestReport, ScreenerError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ScreenerError::InvalidInput("Symbol cannot be empty".to_string()));
        }

        let series = self
            .source
            .get_daily_series(symbol, self.scanner.config().lookback_days)
            .await
            .map_err(|e| {
                ScreenerError::unavailable(symbol, Unavailable::Fetch(e.to_string()))
            })?;

        info!("Loaded {} bars for {}", series.len(), symbol);

        let mut engine = BacktestEngine::new(create_setup(setup), self.backtest_config.clone());
        engine.run(&series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemoryDataSource, StaticUniverse};
    use crate::test_support::{flat_series, pullback_rows, series_from_ohlcv};
    use rust_decimal::Decimal;

    fn screener() -> Screener {
        let universe = StaticUniverse::from_instruments(vec![
            Instrument::new("005930", "삼성전자"),
            Instrument::new("000660", "SK하이닉스"),
        ]);
        let source = MemoryDataSource::new()
            .with_series(series_from_ohlcv("005930", &pullback_rows()))
            .with_series(flat_series("000660", 30, 100, 1_000));
        Screener::new(Arc::new(universe), Arc::new(source))
    }

    #[tokio::test]
    async fn test_scan_universe() {
        let report = screener().scan_universe().await.unwrap();

        assert_eq!(report.pullback.len(), 1);
        assert_eq!(report.pullback[0].display_name, "삼성전자");
        assert!(report.breakout.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].symbol, "000660");
    }

    #[tokio::test]
    async fn test_backtest_warmup_only_series() {
        let report = screener()
            .backtest("005930", SetupKind::Pullback)
            .await
            .unwrap();

        assert_eq!(report.symbol, "005930");
        assert_eq!(report.setup, SetupKind::Pullback);
        // 60 bars leave nothing after the warm-up window
        assert!(report.trades.is_empty());
        assert_eq!(report.total_trades(), 0);
        assert_eq!(report.total_return(), Decimal::ZERO);
        assert_eq!(report.win_rate(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_backtest_errors() {
        let screener = screener();

        assert!(matches!(
            screener.backtest("000660", SetupKind::Pullback).await,
            Err(ScreenerError::DataUnavailable {
                reason: Unavailable::TooShort { .. },
                ..
            })
        ));
        assert!(matches!(
            screener.backtest("999999", SetupKind::Breakout).await,
            Err(ScreenerError::DataUnavailable {
                reason: Unavailable::Fetch(_),
                ..
            })
        ));
        assert!(matches!(
            screener.backtest("  ", SetupKind::Breakout).await,
            Err(ScreenerError::InvalidInput(_))
        ));
    }
}

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::backtest::BacktestConfig;
use crate::service::ScanConfig;
use screener_common::Instrument;

pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub base_url: String,
    /// Appended to listing codes to form the provider ticker
    pub symbol_suffix: String,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHART_URL.to_string(),
            symbol_suffix: ".KS".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub scanner: ScanConfig,
    pub backtest: BacktestConfig,
    pub source: SourceSettings,
    /// Overrides the built-in universe when present
    #[serde(default)]
    pub universe: Option<Vec<Instrument>>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load(&format!("config/{}", run_mode))
    }

    /// Defaults, then the optional file at `path`, then `SCREENER__` variables
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let source = SourceSettings::default();
        let scanner = ScanConfig::default();

        let builder = Config::builder()
            .set_default("scanner.max_concurrency", scanner.max_concurrency as u64)?
            .set_default("scanner.lookback_days", u64::from(scanner.lookback_days))?
            .set_default("backtest.initial_capital", "1000000")?
            .set_default("backtest.emit_synthetic_close", true)?
            .set_default("source.base_url", source.base_url)?
            .set_default("source.symbol_suffix", source.symbol_suffix)?
            .set_default("source.timeout_secs", source.timeout_secs)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SCREENER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.max_concurrency == 0 {
            return Err(ConfigError::Message(
                "scanner.max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.backtest.initial_capital <= Decimal::ZERO {
            return Err(ConfigError::Message(
                "backtest.initial_capital must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load("config/does-not-exist").unwrap();

        assert_eq!(settings.scanner.max_concurrency, 16);
        assert_eq!(settings.backtest.initial_capital, Decimal::from(1_000_000));
        assert!(settings.backtest.emit_synthetic_close);
        assert_eq!(settings.source.symbol_suffix, ".KS");
        assert!(settings.universe.is_none());
    }
}

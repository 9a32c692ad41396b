use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ScreenerError;
use crate::signal::{Levels, SetupKind};
use screener_common::Instrument;

/// Scan fan-out configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Maximum number of symbols fetched and classified at once
    pub max_concurrency: usize,
    /// Calendar days of history requested per symbol
    pub lookback_days: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 16,
            lookback_days: 365,
        }
    }
}

/// A symbol whose latest bar matched a setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub symbol: String,
    pub display_name: String,
    pub entry_price: Decimal,
    pub stop: Decimal,
    pub target: Decimal,
    pub setup: SetupKind,
    pub setup_label: String,
}

impl Hit {
    pub fn new(instrument: &Instrument, setup: SetupKind, levels: Levels) -> Self {
        Self {
            symbol: instrument.code.clone(),
            display_name: instrument.name.clone(),
            entry_price: levels.entry,
            stop: levels.stop,
            target: levels.target,
            setup,
            setup_label: setup.label().to_string(),
        }
    }
}

/// A symbol left out of the scan and why
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub error: ScreenerError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub pullback: Vec<Hit>,
    pub breakout: Vec<Hit>,
    pub skipped: Vec<SkippedSymbol>,
}

impl ScanReport {
    pub fn push(&mut self, hit: Hit) {
        match hit.setup {
            SetupKind::Pullback => self.pullback.push(hit),
            SetupKind::Breakout => self.breakout.push(hit),
        }
    }

    pub fn skip(&mut self, symbol: impl Into<String>, error: ScreenerError) {
        self.skipped.push(SkippedSymbol {
            symbol: symbol.into(),
            error,
        });
    }

    pub fn hits(&self, setup: SetupKind) -> &[Hit] {
        match setup {
            SetupKind::Pullback => &self.pullback,
            SetupKind::Breakout => &self.breakout,
        }
    }

    pub fn hit_count(&self) -> usize {
        self.pullback.len() + self.breakout.len()
    }

    /// Order every list by symbol code; completion order is not deterministic
    pub fn sort(&mut self) {
        self.pullback.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        self.breakout.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        self.skipped.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    }
}

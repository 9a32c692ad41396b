use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{Levels, SetupKind, Signal};
use crate::errors::ScreenerError;
use crate::indicators::Snapshot;

/// Maximum distance of the close from MA20 for a pullback, as a fraction of MA20
pub const PULLBACK_BAND: f64 = 0.03;
/// Volume multiple of Vol_MA5 a breakout must exceed
pub const BREAKOUT_VOLUME_MULTIPLE: f64 = 1.5;
/// Minimum day-over-day gain for a breakout
pub const BREAKOUT_MIN_CHANGE: f64 = 0.02;

/// A trading setup: an entry predicate plus the price levels it implies
pub trait Setup: Send + Sync {
    fn kind(&self) -> SetupKind;
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// Entry condition for one day
    fn matches(&self, snapshot: &Snapshot) -> bool;

    /// Stop and target for an entry at this day's close
    fn levels(&self, snapshot: &Snapshot) -> Result<Levels, ScreenerError>;

    fn signal(&self, snapshot: &Snapshot) -> Result<Signal, ScreenerError> {
        if self.matches(snapshot) {
            Ok(Signal::from_kind(self.kind(), self.levels(snapshot)?))
        } else {
            Ok(Signal::NoSignal)
        }
    }
}

pub struct PullbackSetup;

impl Setup for PullbackSetup {
    fn kind(&self) -> SetupKind {
        SetupKind::Pullback
    }

    fn name(&self) -> &str {
        "Pullback"
    }

    fn description(&self) -> &str {
        "Uptrend (MA20 > MA60), close within 3% of MA20, volume below its 5-day average"
    }

    fn matches(&self, s: &Snapshot) -> bool {
        s.ma20 > s.ma60
            && (s.close - s.ma20).abs() / s.ma20 <= PULLBACK_BAND
            && s.volume < s.vol_ma5
    }

    fn levels(&self, s: &Snapshot) -> Result<Levels, ScreenerError> {
        let entry = s.close_price.trunc();
        let ma20 = Decimal::from_f64(s.ma20)
            .ok_or_else(|| {
                ScreenerError::InvalidInput(format!("MA20 {} on {} is not finite", s.ma20, s.date))
            })?
            .trunc();

        // Under MA20 the stop is the flat 3% one
        let stop = if entry < ma20 { percent_stop(entry) } else { ma20 };

        Ok(Levels {
            entry,
            stop,
            target: percent_target(entry),
        })
    }
}

pub struct BreakoutSetup;

impl Setup for BreakoutSetup {
    fn kind(&self) -> SetupKind {
        SetupKind::Breakout
    }

    fn name(&self) -> &str {
        "Breakout"
    }

    fn description(&self) -> &str {
        "Volume above 1.5x its 5-day average, close up more than 2% on a green day above MA60"
    }

    fn matches(&self, s: &Snapshot) -> bool {
        s.volume > s.vol_ma5 * BREAKOUT_VOLUME_MULTIPLE
            && s.change > BREAKOUT_MIN_CHANGE
            && s.close > s.open
            && s.close > s.ma60
    }

    fn levels(&self, s: &Snapshot) -> Result<Levels, ScreenerError> {
        let entry = s.close_price.trunc();
        Ok(Levels {
            entry,
            stop: percent_stop(entry),
            target: percent_target(entry),
        })
    }
}

/// 3% under entry, floored
fn percent_stop(entry: Decimal) -> Decimal {
    (entry * Decimal::new(97, 2)).floor()
}

/// 5% over entry, floored
fn percent_target(entry: Decimal) -> Decimal {
    (entry * Decimal::new(105, 2)).floor()
}

pub fn create_setup(kind: SetupKind) -> Box<dyn Setup> {
    match kind {
        SetupKind::Pullback => Box::new(PullbackSetup),
        SetupKind::Breakout => Box::new(BreakoutSetup),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

pub fn list_setups() -> Vec<SetupInfo> {
    SetupKind::ALL
        .iter()
        .map(|&kind| {
            let setup = create_setup(kind);
            SetupInfo {
                id: kind.id().to_string(),
                name: setup.name().to_string(),
                description: setup.description().to_string(),
            }
        })
        .collect()
}

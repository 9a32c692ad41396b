use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ScreenerError;

/// The two setups the screener knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupKind {
    /// Quiet pullback to a rising 20-day average ("sniper")
    Pullback,
    /// High-volume surge above the 60-day average ("breaker")
    Breakout,
}

impl SetupKind {
    pub const ALL: [SetupKind; 2] = [SetupKind::Pullback, SetupKind::Breakout];

    pub fn id(&self) -> &'static str {
        match self {
            SetupKind::Pullback => "pullback",
            SetupKind::Breakout => "breakout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SetupKind::Pullback => "Pullback",
            SetupKind::Breakout => "Breakout",
        }
    }
}

impl fmt::Display for SetupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SetupKind {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pullback" | "sniper" => Ok(SetupKind::Pullback),
            "breakout" | "breaker" => Ok(SetupKind::Breakout),
            other => Err(ScreenerError::InvalidInput(format!(
                "Unknown setup '{}', expected 'pullback' or 'breakout'",
                other
            ))),
        }
    }
}

/// Entry, stop and target prices, truncated to whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levels {
    pub entry: Decimal,
    pub stop: Decimal,
    pub target: Decimal,
}

/// Classifier output for one symbol on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Signal {
    NoSignal,
    Pullback(Levels),
    Breakout(Levels),
}

impl Signal {
    pub fn from_kind(kind: SetupKind, levels: Levels) -> Self {
        match kind {
            SetupKind::Pullback => Signal::Pullback(levels),
            SetupKind::Breakout => Signal::Breakout(levels),
        }
    }

    pub fn kind(&self) -> Option<SetupKind> {
        match self {
            Signal::NoSignal => None,
            Signal::Pullback(_) => Some(SetupKind::Pullback),
            Signal::Breakout(_) => Some(SetupKind::Breakout),
        }
    }

    pub fn levels(&self) -> Option<&Levels> {
        match self {
            Signal::NoSignal => None,
            Signal::Pullback(levels) | Signal::Breakout(levels) => Some(levels),
        }
    }

    pub fn is_signal(&self) -> bool {
        !matches!(self, Signal::NoSignal)
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSeries;
use crate::signal::SetupKind;

/// First index the simulator may trade on; earlier bars only warm up the indicators
pub const TRADING_START: usize = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_capital: Decimal,
    /// Emit a SELL for a position still open when the series ends
    pub emit_synthetic_close: bool,
}

impl BacktestConfig {
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            initial_capital,
            emit_synthetic_close: true,
        }
    }

    pub fn with_synthetic_close(mut self, emit: bool) -> Self {
        self.emit_synthetic_close = emit;
        self
    }
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self::new(Decimal::from(1_000_000))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
    /// Liquidated at the final close
    EndOfSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub side: OrderSide,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Realised profit of the round-trip in percent, SELL only
    pub profit: Option<Decimal>,
    pub exit_reason: Option<ExitReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub entry_date: NaiveDate,
    pub entry_price: Decimal,
    pub quantity: Decimal,
}

/// Single-position account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub cash: Decimal,
    pub position: Option<Position>,
}

impl Portfolio {
    pub fn new(cash: Decimal) -> Self {
        Self {
            cash,
            position: None,
        }
    }

    /// Cash plus the position marked at `price`
    pub fn value_at(&self, price: Decimal) -> Decimal {
        match &self.position {
            Some(position) => self.cash + position.quantity * price,
            None => self.cash,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Percent
    pub total_return: Decimal,
    /// Percent of closed round-trips with positive profit
    pub win_rate: Decimal,
    /// Number of SELL events
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub avg_profit_per_trade: Decimal,
    /// Largest peak-to-trough fall of the equity curve, percent
    pub max_drawdown: Decimal,
    pub initial_balance: Decimal,
    pub final_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub setup: SetupKind,
    pub metrics: Metrics,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub series: IndicatorSeries,
}

impl BacktestReport {
    pub fn total_return(&self) -> Decimal {
        self.metrics.total_return
    }

    pub fn win_rate(&self) -> Decimal {
        self.metrics.win_rate
    }

    pub fn total_trades(&self) -> u32 {
        self.metrics.total_trades
    }
}

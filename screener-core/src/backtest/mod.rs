pub mod engine;
pub mod metrics;
pub mod types;

pub use engine::BacktestEngine;
pub use metrics::MetricsCalculator;
pub use types::{
    BacktestConfig, BacktestReport, EquityPoint, ExitReason, Metrics, OrderSide, Portfolio,
    Position, Trade, TRADING_START,
};

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::metrics::MetricsCalculator;
use super::types::*;
use crate::errors::ScreenerError;
use crate::indicators::{self, IndicatorBar};
use crate::signal::Setup;
use screener_common::Series;

/// Bracket exit applied to every position regardless of setup: +5% / -3%
fn take_profit_rate() -> Decimal {
    Decimal::new(5, 2)
}

fn stop_loss_rate() -> Decimal {
    Decimal::new(-3, 2)
}

/// Replays one setup over one symbol's history with a single-position account.
///
/// FLAT evaluates the setup's entry condition on each bar's close; LONG only
/// checks the fixed exit bracket. Signals while LONG are ignored.
pub struct BacktestEngine {
    setup: Box<dyn Setup>,
    config: BacktestConfig,
    portfolio: Portfolio,
    trades: Vec<Trade>,
    equity_points: Vec<EquityPoint>,
    metrics_calculator: MetricsCalculator,
}

impl BacktestEngine {
    pub fn new(setup: Box<dyn Setup>, config: BacktestConfig) -> Self {
        let portfolio = Portfolio::new(config.initial_capital);
        Self {
            setup,
            config,
            portfolio,
            trades: Vec::new(),
            equity_points: Vec::new(),
            metrics_calculator: MetricsCalculator::new(),
        }
    }

    pub fn run(&mut self, series: &Series) -> Result<BacktestReport, ScreenerError> {
        indicators::ensure_min_history(series)?;
        if self.config.initial_capital < Decimal::ZERO {
            return Err(ScreenerError::InvalidInput(format!(
                "Initial capital must not be negative, got {}",
                self.config.initial_capital
            )));
        }

        self.reset();
        let augmented = indicators::compute(series)?;

        info!(
            "Starting {} backtest for {} over {} bars",
            self.setup.name(),
            series.symbol(),
            series.len()
        );

        for row in augmented.rows.iter().skip(TRADING_START) {
            if self.portfolio.position.is_some() {
                self.check_exit(row);
            } else {
                self.check_entry(row)?;
            }

            self.equity_points.push(EquityPoint {
                date: row.bar.date,
                value: self.portfolio.value_at(row.bar.close),
            });
        }

        if let Some(last) = augmented.last() {
            self.liquidate_at_end(last);
        }

        let metrics = self.metrics_calculator.calculate(
            &self.trades,
            &self.equity_points,
            self.config.initial_capital,
            self.portfolio.cash,
        );

        info!(
            "Backtest completed for {}: {} closed trades, {}% return",
            series.symbol(),
            metrics.total_trades,
            metrics.total_return.round_dp(2)
        );

        Ok(BacktestReport {
            symbol: series.symbol().to_string(),
            setup: self.setup.kind(),
            metrics,
            trades: self.trades.clone(),
            equity_curve: self.equity_points.clone(),
            series: augmented,
        })
    }

    fn reset(&mut self) {
        self.portfolio = Portfolio::new(self.config.initial_capital);
        self.trades.clear();
        self.equity_points.clear();
    }

    fn check_entry(&mut self, row: &IndicatorBar) -> Result<(), ScreenerError> {
        let snapshot = row.snapshot()?;
        if !self.setup.matches(&snapshot) {
            return Ok(());
        }

        let price = row.bar.close;
        let mut quantity = (self.portfolio.cash / price).floor();
        // Decimal division rounds at 28 digits and can land on the next integer
        if quantity * price > self.portfolio.cash {
            quantity -= Decimal::ONE;
        }
        if quantity <= Decimal::ZERO {
            debug!(
                "{} signal on {} skipped: cash {} buys no units at {}",
                self.setup.name(),
                row.bar.date,
                self.portfolio.cash,
                price
            );
            return Ok(());
        }

        self.portfolio.cash -= quantity * price;
        self.portfolio.position = Some(Position {
            entry_date: row.bar.date,
            entry_price: price,
            quantity,
        });

        info!("Executed trade: {} BUY {} @ {}", row.bar.date, quantity, price);
        self.trades.push(Trade {
            date: row.bar.date,
            side: OrderSide::Buy,
            price,
            quantity,
            profit: None,
            exit_reason: None,
        });
        Ok(())
    }

    fn check_exit(&mut self, row: &IndicatorBar) {
        let Some(position) = &self.portfolio.position else {
            return;
        };

        let profit_rate = (row.bar.close - position.entry_price) / position.entry_price;
        let reason = if profit_rate >= take_profit_rate() {
            ExitReason::TakeProfit
        } else if profit_rate <= stop_loss_rate() {
            ExitReason::StopLoss
        } else {
            return;
        };

        let trade = self.close_position(row, reason);
        self.trades.push(trade);
    }

    fn liquidate_at_end(&mut self, last: &IndicatorBar) {
        if self.portfolio.position.is_none() {
            return;
        }

        let trade = self.close_position(last, ExitReason::EndOfSeries);
        if self.config.emit_synthetic_close {
            self.trades.push(trade);
        } else {
            debug!("Open position marked to market on {} without a SELL record", last.bar.date);
        }
    }

    /// Sell the whole position at the bar's close and return the SELL record
    fn close_position(&mut self, row: &IndicatorBar, reason: ExitReason) -> Trade {
        let price = row.bar.close;
        let (quantity, profit) = match self.portfolio.position.take() {
            Some(position) => {
                let rate = (price - position.entry_price) / position.entry_price;
                (position.quantity, rate * Decimal::ONE_HUNDRED)
            }
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        self.portfolio.cash += quantity * price;

        info!(
            "Executed trade: {} SELL {} @ {} ({:?}, {}%)",
            row.bar.date,
            quantity,
            price,
            reason,
            profit.round_dp(2)
        );

        Trade {
            date: row.bar.date,
            side: OrderSide::Sell,
            price,
            quantity,
            profit: Some(profit),
            exit_reason: Some(reason),
        }
    }
}

use rust_decimal::Decimal;

use super::types::*;

pub struct MetricsCalculator;

impl MetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(
        &self,
        trades: &[Trade],
        equity_points: &[EquityPoint],
        initial_balance: Decimal,
        final_balance: Decimal,
    ) -> Metrics {
        let profits: Vec<Decimal> = trades
            .iter()
            .filter(|t| t.side == OrderSide::Sell)
            .map(|t| t.profit.unwrap_or_default())
            .collect();
        let winning_trades = profits.iter().filter(|p| **p > Decimal::ZERO).count();

        Metrics {
            total_return: self.calculate_total_return(initial_balance, final_balance),
            win_rate: self.calculate_win_rate(winning_trades, profits.len()),
            total_trades: profits.len() as u32,
            winning_trades: winning_trades as u32,
            losing_trades: (profits.len() - winning_trades) as u32,
            avg_profit_per_trade: self.calculate_avg_profit(&profits),
            max_drawdown: self.calculate_drawdown(equity_points),
            initial_balance,
            final_balance,
        }
    }

    fn calculate_total_return(&self, initial: Decimal, final_balance: Decimal) -> Decimal {
        if initial.is_zero() {
            return Decimal::ZERO;
        }
        (final_balance - initial) / initial * Decimal::ONE_HUNDRED
    }

    fn calculate_win_rate(&self, winning_trades: usize, total_trades: usize) -> Decimal {
        if total_trades == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(winning_trades) / Decimal::from(total_trades) * Decimal::ONE_HUNDRED
    }

    fn calculate_avg_profit(&self, profits: &[Decimal]) -> Decimal {
        if profits.is_empty() {
            return Decimal::ZERO;
        }
        profits.iter().sum::<Decimal>() / Decimal::from(profits.len())
    }

    fn calculate_drawdown(&self, equity_points: &[EquityPoint]) -> Decimal {
        let mut max_drawdown = Decimal::ZERO;
        let mut peak = Decimal::ZERO;

        for point in equity_points {
            if point.value > peak {
                peak = point.value;
            } else if peak > Decimal::ZERO {
                let drawdown = (peak - point.value) / peak * Decimal::ONE_HUNDRED;
                if drawdown > max_drawdown {
                    max_drawdown = drawdown;
                }
            }
        }

        max_drawdown
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

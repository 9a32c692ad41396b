// rust-trade screener: a Rust swing-setup screener and backtester
// Copyright (C) 2024 Harrison
//
// This program is part of rust-trade and is released under the GNU GPL v3
// or later. See the LICENSE file for details.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use screener_core::{
    backtest::{BacktestReport, OrderSide},
    config::Settings,
    service::{Hit, ScanReport, Screener},
    signal::{list_setups, SetupKind},
    source::{StaticUniverse, Universe, YahooDataSource},
};

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Swing setup screener and backtester for daily equity data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the instruments in the configured universe
    Symbols,
    /// Classify the latest bar of every instrument in the universe
    Scan,
    /// Replay one setup over one symbol's history
    Backtest {
        #[arg(short, long)]
        symbol: String,
        /// pullback or breakout
        #[arg(long, default_value = "pullback")]
        setup: String,
        /// Leave a position open at the end instead of recording a closing SELL
        #[arg(long)]
        keep_open_position: bool,
    },
    /// Describe the available setups
    Setups,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let settings = Settings::new().context("Failed to load configuration")?;

    let universe: Arc<dyn Universe> = match &settings.universe {
        Some(instruments) if !instruments.is_empty() => {
            info!("Using configured universe of {} symbols", instruments.len());
            Arc::new(StaticUniverse::from_instruments(instruments.clone()))
        }
        _ => Arc::new(StaticUniverse::kospi_top20()),
    };
    let source = Arc::new(YahooDataSource::new(&settings.source)?);

    let mut backtest_config = settings.backtest.clone();

    match cli.command {
        Commands::Symbols => {
            let screener = Screener::new(universe, source);
            for instrument in screener.list_symbols().await? {
                println!("{}  {}", instrument.code, instrument.name);
            }
        }

        Commands::Setups => {
            for setup in list_setups() {
                println!("{:<10} {:<10} {}", setup.id, setup.name, setup.description);
            }
        }

        Commands::Scan => {
            let screener =
                Screener::new(universe, source).with_scan_config(settings.scanner.clone());
            let report = screener.scan_universe().await?;
            print_scan(&report);
        }

        Commands::Backtest {
            symbol,
            setup,
            keep_open_position,
        } => {
            let setup: SetupKind = setup.parse()?;
            if keep_open_position {
                backtest_config = backtest_config.with_synthetic_close(false);
            }

            let screener = Screener::new(universe, source)
                .with_scan_config(settings.scanner.clone())
                .with_backtest_config(backtest_config);
            let report = screener.backtest(&symbol, setup).await?;
            print_backtest(&report);
        }
    }

    Ok(())
}

fn print_scan(report: &ScanReport) {
    for setup in SetupKind::ALL {
        let hits = report.hits(setup);
        println!("\n[{}] {} symbols", setup.label(), hits.len());
        for hit in hits {
            print_hit(hit);
        }
    }

    if !report.skipped.is_empty() {
        warn!("{} symbols skipped", report.skipped.len());
        for skipped in &report.skipped {
            println!("  skipped {}: {}", skipped.symbol, skipped.error);
        }
    }
}

fn print_hit(hit: &Hit) {
    println!(
        "  {} {:<12} entry {:>10}  stop {:>10}  target {:>10}",
        hit.symbol,
        hit.display_name,
        with_separators(hit.entry_price),
        with_separators(hit.stop),
        with_separators(hit.target)
    );
}

fn print_backtest(report: &BacktestReport) {
    let m = &report.metrics;
    println!("\nBacktest Results: {} / {}", report.symbol, report.setup);
    println!("Initial Balance: {}", with_separators(m.initial_balance));
    println!("Final Balance: {}", with_separators(m.final_balance));
    println!("Total Return: {}%", m.total_return.round_dp(2));
    println!("Total Trades: {}", m.total_trades);
    println!(
        "Win Rate: {}% ({} won, {} lost)",
        m.win_rate.round_dp(2),
        m.winning_trades,
        m.losing_trades
    );
    println!("Avg Profit per Trade: {}%", m.avg_profit_per_trade.round_dp(2));
    println!("Max Drawdown: {}%", m.max_drawdown.round_dp(2));

    println!("\nTrade History:");
    for trade in &report.trades {
        let side = if trade.side == OrderSide::Buy { "BUY" } else { "SELL" };
        match (trade.profit, trade.exit_reason) {
            (Some(profit), Some(reason)) => println!(
                "{} {:<4} {} @ {} ({}%, {:?})",
                trade.date,
                side,
                trade.quantity,
                with_separators(trade.price),
                profit.round_dp(2),
                reason
            ),
            _ => println!(
                "{} {:<4} {} @ {}",
                trade.date,
                side,
                trade.quantity,
                with_separators(trade.price)
            ),
        }
    }
}

/// Whole-unit amount with thousands separators, e.g. 1,000,000
fn with_separators(value: Decimal) -> String {
    let rounded = value.round().to_string();
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_separators() {
        assert_eq!(with_separators(Decimal::from(1_000_000)), "1,000,000");
        assert_eq!(with_separators(Decimal::from(999)), "999");
        assert_eq!(with_separators(Decimal::new(-1_234_567, 1)), "-123,457");
    }
}

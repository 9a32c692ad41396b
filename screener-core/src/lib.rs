// rust-trade screener: a Rust swing-setup screener and backtester
// Copyright (C) 2024 Harrison
//
// This program is part of rust-trade and is released under the GNU GPL v3
// or later. See the LICENSE file for details.

pub mod backtest;
pub mod config;
pub mod errors;
pub mod indicators;
pub mod service;
pub mod signal;
pub mod source;

pub use errors::{ScreenerError, Unavailable};
pub use screener_common::{Bar, Instrument, Series};

#[cfg(test)]
pub(crate) mod test_support;

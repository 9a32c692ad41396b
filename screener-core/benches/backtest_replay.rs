use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;

use screener_core::backtest::{BacktestConfig, BacktestEngine};
use screener_core::indicators::compute;
use screener_core::signal::{create_setup, SetupKind};
use screener_core::{Bar, Series};

/// Oscillating daily series with periodic volume spikes
fn create_test_series(len: usize) -> Series {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let bars = (0..len)
        .map(|i| {
            let x = i as f64;
            let close = 10_000.0 + x * 5.0 + (x / 7.0).sin() * 600.0;
            let open = close - (x / 3.0).cos() * 80.0;
            let volume = if i % 11 == 0 { 400_000 } else { 100_000 + (i as u64 % 7) * 5_000 };
            let close = Decimal::from(close.round() as i64);
            let open = Decimal::from(open.round() as i64);
            Bar::new(
                start + Duration::days(i as i64),
                open,
                open.max(close),
                open.min(close),
                close,
                volume,
            )
        })
        .collect();
    Series::new("005930", bars).unwrap()
}

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for size in [250, 1_000, 5_000].iter() {
        let series = create_test_series(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &series, |b, series| {
            b.iter(|| compute(black_box(series)).unwrap());
        });
    }

    group.finish();
}

fn bench_backtest(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtest_replay");
    let series = create_test_series(1_000);

    for kind in SetupKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind.id()), &kind, |b, &kind| {
            b.iter(|| {
                let mut engine = BacktestEngine::new(create_setup(kind), BacktestConfig::default());
                engine.run(black_box(&series)).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_indicators, bench_backtest);
criterion_main!(benches);

//! Criterion benchmarks for the engine hot paths.
//!
//! Benchmarks:
//! 1. Policy runs (simple, delayed, mean-reversion) over growing horizons
//! 2. Buy-and-hold baseline
//! 3. Indicator precompute (rolling mean, RSI)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use siglab_core::baseline::run_buy_and_hold;
use siglab_core::data::AlignedSeries;
use siglab_core::engine::{run_policy, EngineConfig};
use siglab_core::indicators::{rolling_mean, rsi};
use siglab_core::policy::{DelayedLongOnly, LongOnly, MeanReversion};

fn make_series(n: usize) -> AlignedSeries {
    let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let prices: Vec<f64> = (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect();
    let signals: Vec<f64> = (0..n).map(|i| (i as f64 * 0.17).cos() * 0.05).collect();
    let oscillator: Vec<f64> = (0..n)
        .map(|i| 50.0 + (i as f64 * 0.23).sin() * 30.0)
        .collect();
    AlignedSeries {
        dates: (0..n)
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect(),
        prices,
        signals,
        oscillator: Some(oscillator),
        tail_price: None,
    }
}

fn bench_policy_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_run");
    let config = EngineConfig::new(100_000.0, 0.001).unwrap();

    for &n in &[252, 1260, 2520] {
        let series = make_series(n);

        group.bench_with_input(BenchmarkId::new("long_only", n), &n, |b, _| {
            b.iter(|| {
                let mut policy = LongOnly::new(0.0);
                run_policy(black_box(&config), &mut policy, black_box(&series))
            });
        });

        group.bench_with_input(BenchmarkId::new("delayed_t2", n), &n, |b, _| {
            b.iter(|| {
                let mut policy = DelayedLongOnly::new(0.0, 2);
                run_policy(black_box(&config), &mut policy, black_box(&series))
            });
        });

        group.bench_with_input(BenchmarkId::new("mean_reversion", n), &n, |b, _| {
            b.iter(|| {
                let mut policy = MeanReversion::new(0.0);
                run_policy(black_box(&config), &mut policy, black_box(&series))
            });
        });
    }

    group.finish();
}

fn bench_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("baseline");
    let config = EngineConfig::new(100_000.0, 0.001).unwrap();

    for &n in &[1260, 2520] {
        let series = make_series(n);
        group.bench_with_input(BenchmarkId::new("buy_and_hold", n), &n, |b, _| {
            b.iter(|| run_buy_and_hold(black_box(&config), black_box(&series)));
        });
    }

    group.finish();
}

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &n in &[1260, 2520] {
        let series = make_series(n);

        group.bench_with_input(BenchmarkId::new("rolling_mean_30", n), &n, |b, _| {
            b.iter(|| rolling_mean(black_box(&series.signals), 30, 10));
        });

        group.bench_with_input(BenchmarkId::new("rsi_14", n), &n, |b, _| {
            b.iter(|| rsi(black_box(&series.prices), 14));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_policy_runs, bench_baseline, bench_indicators);
criterion_main!(benches);

//! SigLab Runner — backtest orchestration, metrics, comparison, artifacts.
//!
//! This crate builds on `siglab-core` to provide:
//! - CSV loading for prices and model signals, plus a seeded demo generator
//! - TOML run configuration with content-addressed run ids
//! - Single-run orchestration and rayon parallel comparisons
//! - Performance metrics and head-to-head verdicts
//! - Text/markdown reports and per-run artifact export

pub mod artifacts;
pub mod comparison;
pub mod config;
pub mod data_loader;
pub mod metrics;
pub mod report;
pub mod runner;

pub use artifacts::{ArtifactManager, ArtifactPaths};
pub use comparison::{ComparisonTable, StrategyComparison, Verdict};
pub use config::{PolicyConfig, RunConfig, RunId};
pub use data_loader::{generate_demo_data, load_price_csv, load_signal_csv, DemoData, LoadError};
pub use metrics::{BacktestMetrics, DEFAULT_PERIODS_PER_YEAR};
pub use runner::{
    run_comparison, run_single, BacktestResult, ComparisonOutcome, RunError, SCHEMA_VERSION,
};

//! SigLab CLI — run, compare, and demo commands.
//!
//! Commands:
//! - `run` — execute one configured backtest over price/signal CSVs
//! - `compare` — run several configs in parallel and table them against
//!   buy-and-hold
//! - `demo` — same comparison over a seeded synthetic series, no files
//!   needed

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use siglab_core::data::{align_series, AlignedSeries};
use siglab_runner::artifacts::ArtifactManager;
use siglab_runner::config::{PolicyConfig, RunConfig};
use siglab_runner::data_loader::{generate_demo_data, load_price_csv, load_signal_csv};
use siglab_runner::report::{render_markdown, render_text};
use siglab_runner::runner::{run_comparison, run_single, BacktestResult};

#[derive(Parser)]
#[command(name = "siglab", about = "SigLab CLI — signal-driven backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one backtest from a TOML config file.
    Run {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Price CSV (`date,close`).
        #[arg(long)]
        prices: PathBuf,

        /// Signal CSV (`date,predicted_return`).
        #[arg(long)]
        signals: PathBuf,

        /// Multiply every price by this factor (for normalized inputs).
        #[arg(long)]
        unscale: Option<f64>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Run several configs in parallel and compare against buy-and-hold.
    Compare {
        /// One or more TOML run configs.
        #[arg(long, required = true)]
        config: Vec<PathBuf>,

        /// Price CSV (`date,close`).
        #[arg(long)]
        prices: PathBuf,

        /// Signal CSV (`date,predicted_return`).
        #[arg(long)]
        signals: PathBuf,

        /// Multiply every price by this factor (for normalized inputs).
        #[arg(long)]
        unscale: Option<f64>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Compare every policy on a seeded synthetic series.
    Demo {
        /// Random seed for the synthetic series.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of trading periods to simulate.
        #[arg(long, default_value_t = 252)]
        periods: usize,

        /// Write artifacts too (skipped by default).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            prices,
            signals,
            unscale,
            output_dir,
        } => cmd_run(&config, &prices, &signals, unscale, &output_dir),
        Commands::Compare {
            config,
            prices,
            signals,
            unscale,
            output_dir,
        } => cmd_compare(&config, &prices, &signals, unscale, &output_dir),
        Commands::Demo {
            seed,
            periods,
            output_dir,
        } => cmd_demo(seed, periods, output_dir.as_deref()),
    }
}

fn load_series(
    prices: &std::path::Path,
    signals: &std::path::Path,
    unscale: Option<f64>,
) -> Result<AlignedSeries> {
    let unscale_fn = unscale.map(|factor| move |v: f64| v * factor);
    let price_points = match &unscale_fn {
        Some(f) => load_price_csv(prices, Some(f))?,
        None => load_price_csv(prices, None)?,
    };
    let signal_points = load_signal_csv(signals)?;
    align_series(&price_points, &signal_points, None)
        .context("aligning price and signal series")
}

fn cmd_run(
    config_path: &std::path::Path,
    prices: &std::path::Path,
    signals: &std::path::Path,
    unscale: Option<f64>,
    output_dir: &std::path::Path,
) -> Result<()> {
    let config = RunConfig::from_toml_path(config_path)?;
    let series = load_series(prices, signals, unscale)?;

    let result = run_single(&config, &series)?;
    print_summary(&result);

    let manager = ArtifactManager::new(output_dir)?;
    let paths = manager.save_run(&result)?;
    println!("Artifacts saved to: {}", paths.result_json.display());
    Ok(())
}

fn cmd_compare(
    config_paths: &[PathBuf],
    prices: &std::path::Path,
    signals: &std::path::Path,
    unscale: Option<f64>,
    output_dir: &std::path::Path,
) -> Result<()> {
    if config_paths.is_empty() {
        bail!("at least one --config is required");
    }
    let configs: Vec<RunConfig> = config_paths
        .iter()
        .map(|p| RunConfig::from_toml_path(p))
        .collect::<Result<_>>()?;
    let series = load_series(prices, signals, unscale)?;

    let outcome = run_comparison(&configs, &series)?;
    print!("{}", render_text(&outcome.table));

    let manager = ArtifactManager::new(output_dir)?;
    for result in outcome.results.iter().chain([&outcome.baseline]) {
        manager.save_run(result)?;
    }
    let report = manager.save_report(&outcome.baseline.run_id, &render_markdown(&outcome))?;
    println!("Report saved to: {}", report.display());
    Ok(())
}

fn cmd_demo(seed: u64, periods: usize, output_dir: Option<&std::path::Path>) -> Result<()> {
    let data = generate_demo_data(seed, periods);
    let series = align_series(&data.prices, &data.signals, None)
        .context("aligning synthetic series")?;

    let base = RunConfig {
        initial_capital: 100_000.0,
        commission_rate: 0.001,
        periods_per_year: 252.0,
        liquidate_at_end: false,
        policy: PolicyConfig::LongOnly { threshold: 0.5 },
    };
    let configs = vec![
        base.clone(),
        RunConfig {
            policy: PolicyConfig::DelayedLongOnly {
                threshold: 0.5,
                settlement_delay: 2,
            },
            ..base.clone()
        },
        RunConfig {
            policy: PolicyConfig::MeanReversion {
                neutral_threshold: 0.5,
                lookback_window: 30,
                min_periods: 10,
                oversold: 40.0,
                overbought: 60.0,
                stop_loss_pct: 0.07,
            },
            ..base
        },
    ];

    let outcome = run_comparison(&configs, &series)?;
    println!("Synthetic series: seed {seed}, {periods} periods\n");
    print!("{}", render_text(&outcome.table));

    if let Some(dir) = output_dir {
        let manager = ArtifactManager::new(dir)?;
        for result in outcome.results.iter().chain([&outcome.baseline]) {
            manager.save_run(result)?;
        }
        let report = manager.save_report(&outcome.baseline.run_id, &render_markdown(&outcome))?;
        println!("\nReport saved to: {}", report.display());
    }
    Ok(())
}

fn print_summary(result: &BacktestResult) {
    let m = &result.metrics;
    println!("Run {} ({})", result.run_id, result.label);
    println!("  Total return : {:+.2}%", m.total_return_pct);
    println!("  Sharpe       : {:.2}", m.sharpe_ratio);
    println!("  Max drawdown : {:+.2}%", m.max_drawdown_pct);
    println!("  Win rate     : {:.1}%", m.win_rate_pct);
    println!("  Trades       : {}", m.num_trades);
    println!("  Commission   : {:.2}", m.total_commission);
    println!("  Final capital: {:.2}", m.final_capital);
}

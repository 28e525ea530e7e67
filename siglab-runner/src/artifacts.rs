//! Artifact export for finished runs.
//!
//! Everything for one run lands under `<output_dir>/<run_id>/`:
//! `result.json` (the full serializable result), `equity.csv`, and
//! `trades.csv`. Re-running an identical config overwrites the same
//! directory, since the run id is a content hash of the config.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use siglab_core::domain::TradeRecord;

use crate::runner::BacktestResult;

/// Paths written for one run.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub result_json: PathBuf,
    pub equity_csv: PathBuf,
    pub trades_csv: PathBuf,
}

/// Writes all artifacts for finished runs under one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("creating artifact output directory")?;
        Ok(Self { output_dir })
    }

    /// Save complete artifacts for one run.
    pub fn save_run(&self, result: &BacktestResult) -> Result<ArtifactPaths> {
        let run_dir = self.output_dir.join(&result.run_id);
        std::fs::create_dir_all(&run_dir)
            .with_context(|| format!("creating run directory {}", run_dir.display()))?;

        let result_json = run_dir.join("result.json");
        let json = serde_json::to_string_pretty(result).context("serializing result")?;
        std::fs::write(&result_json, json)
            .with_context(|| format!("writing {}", result_json.display()))?;

        let equity_csv = run_dir.join("equity.csv");
        write_equity_csv(&equity_csv, &result.trajectory)?;

        let trades_csv = run_dir.join("trades.csv");
        write_trades_csv(&trades_csv, &result.trades)?;

        Ok(ArtifactPaths {
            result_json,
            equity_csv,
            trades_csv,
        })
    }

    /// Save a rendered markdown report next to the run artifacts.
    pub fn save_report(&self, run_id: &str, markdown: &str) -> Result<PathBuf> {
        let run_dir = self.output_dir.join(run_id);
        std::fs::create_dir_all(&run_dir)
            .with_context(|| format!("creating run directory {}", run_dir.display()))?;
        let path = run_dir.join("report.md");
        std::fs::write(&path, markdown)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// Trajectory index 0 is the pre-trade initial capital.
fn write_equity_csv(path: &Path, trajectory: &[f64]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating equity CSV {}", path.display()))?;
    writeln!(file, "period,value")?;
    for (period, value) in trajectory.iter().enumerate() {
        writeln!(file, "{period},{value:.4}")?;
    }
    Ok(())
}

fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("creating trades CSV {}", path.display()))?;
    writeln!(
        file,
        "date,period,action,price,shares,commission,settles_at,pnl"
    )?;
    for trade in trades {
        writeln!(
            file,
            "{},{},{:?},{:.4},{},{:.4},{},{}",
            trade.date,
            trade.period,
            trade.action,
            trade.price,
            trade.shares,
            trade.commission,
            trade
                .settles_at
                .map(|p| p.to_string())
                .unwrap_or_default(),
            trade
                .pnl
                .map(|p| format!("{p:.4}"))
                .unwrap_or_default(),
        )?;
    }
    Ok(())
}

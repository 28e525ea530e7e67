//! Report rendering — aligned text tables and markdown.

use crate::comparison::ComparisonTable;
use crate::runner::ComparisonOutcome;

const COLUMNS: [&str; 8] = [
    "strategy",
    "return %",
    "sharpe",
    "max dd %",
    "win %",
    "trade win %",
    "trades",
    "commission",
];

/// Render the comparison as an aligned plain-text table with one verdict
/// line per judgment.
pub fn render_text(table: &ComparisonTable) -> String {
    let rows: Vec<[String; 8]> = table
        .rows
        .iter()
        .map(|row| {
            let m = &row.metrics;
            [
                row.label.clone(),
                format!("{:+.2}", m.total_return_pct),
                format!("{:.2}", m.sharpe_ratio),
                format!("{:+.2}", m.max_drawdown_pct),
                format!("{:.1}", m.win_rate_pct),
                format!("{:.1}", m.trade_win_rate_pct),
                format!("{}", m.num_trades),
                format!("{:.2}", m.total_commission),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{c:>w$}"))
        .collect();
    out.push_str(&header.join("  "));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:>w$}"))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }

    for cmp in table.against_baseline() {
        out.push('\n');
        out.push_str(&format!(
            "{} vs {}: return → {}, sharpe → {}, drawdown → {}",
            cmp.label_a,
            cmp.label_b,
            name_or_tie(&cmp.verdict.higher_return),
            name_or_tie(&cmp.verdict.higher_sharpe),
            name_or_tie(&cmp.verdict.shallower_drawdown),
        ));
    }
    out.push('\n');
    out
}

/// Render the full comparison outcome as a markdown report.
pub fn render_markdown(outcome: &ComparisonOutcome) -> String {
    let mut report = String::from("# SigLab Comparison Report\n\n");

    report.push_str("## Runs\n\n");
    for result in outcome.results.iter().chain(std::iter::once(&outcome.baseline)) {
        report.push_str(&format!("- `{}`: {}\n", result.label, result.run_id));
    }

    report.push_str("\n## Metrics\n\n");
    report.push_str(
        "| Strategy | Return % | Sharpe | Max DD % | Win % | Trade Win % | Trades | Commission |\n",
    );
    report.push_str(
        "|----------|----------|--------|----------|-------|-------------|--------|------------|\n",
    );
    for row in &outcome.table.rows {
        let m = &row.metrics;
        report.push_str(&format!(
            "| {} | {:+.2} | {:.2} | {:+.2} | {:.1} | {:.1} | {} | {:.2} |\n",
            row.label,
            m.total_return_pct,
            m.sharpe_ratio,
            m.max_drawdown_pct,
            m.win_rate_pct,
            m.trade_win_rate_pct,
            m.num_trades,
            m.total_commission,
        ));
    }

    report.push_str("\n## Verdicts\n\n");
    for cmp in outcome.table.against_baseline() {
        report.push_str(&format!(
            "- **{} vs {}** — higher return: {}; higher sharpe: {}; shallower drawdown: {}\n",
            cmp.label_a,
            cmp.label_b,
            name_or_tie(&cmp.verdict.higher_return),
            name_or_tie(&cmp.verdict.higher_sharpe),
            name_or_tie(&cmp.verdict.shallower_drawdown),
        ));
    }

    report
}

fn name_or_tie(winner: &Option<String>) -> &str {
    winner.as_deref().unwrap_or("tie")
}

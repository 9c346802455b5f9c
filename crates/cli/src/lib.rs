//! `outletkpi`: load → calculate → report.
//!
//! [`run`] is the whole pipeline as a callable function; `main.rs` only
//! parses configuration and sets up logging around it.

pub mod config;

use std::io::Write;

use anyhow::Context;
use chrono::Utc;
use tracing::info;

use outletkpi_infra::{export_tables, load_workbook};
use outletkpi_inventory::{KpiCalculator, KpiOutcome, KpiReport, render_text};

pub use config::{Cli, Config, ReportFormat};

/// Run the pipeline for `config`, writing the report to `out`.
///
/// Returns the augmented tables and summary for callers that want to keep
/// working with them.
pub fn run<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<KpiOutcome> {
    let sheets = load_workbook(&config.workbook)
        .with_context(|| format!("cannot load {}", config.workbook.display()))?;

    let outcome = KpiCalculator::new()
        .with_join_strategy(config.join)
        .with_coverage_days(config.coverage_days)
        .calculate_sheets(&sheets.inventory, &sheets.outlet)
        .context("cannot calculate KPIs")?;

    let coercions = &outcome.coercions;
    if coercions.malformed_cells > 0 || coercions.missing_cells > 0 {
        info!(
            malformed = coercions.malformed_cells,
            missing = coercions.missing_cells,
            "numeric cells read as zero"
        );
    }

    if let Some(dir) = &config.export_dir {
        let (inventory_csv, outlet_csv) = export_tables(dir, &outcome.inventory, &outcome.outlet)?;
        info!(
            inventory = %inventory_csv.display(),
            outlet = %outlet_csv.display(),
            "wrote csv"
        );
    }

    match config.format {
        ReportFormat::Text => out.write_all(render_text(&outcome.summary).as_bytes())?,
        ReportFormat::Json => {
            let json = KpiReport::new(&outcome, Utc::now()).to_json_pretty()?;
            writeln!(out, "{json}")?;
        }
    }
    out.flush()?;

    Ok(outcome)
}

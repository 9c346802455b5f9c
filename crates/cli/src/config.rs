//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use outletkpi_core::{DomainError, DomainResult};
use outletkpi_inventory::{DEFAULT_COVERAGE_DAYS, JoinStrategy};
use outletkpi_observability::LogFormat;

/// Inventory and outlet KPI report for an `Inventario`/`Outlet` workbook.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workbook containing the `Inventario` and `Outlet` sheets
    #[arg(env = "OUTLETKPI_WORKBOOK")]
    pub workbook: PathBuf,

    /// How inventory rows are matched to outlet rows
    #[arg(long, env = "OUTLETKPI_JOIN", value_enum, default_value_t = JoinMode::ItemNumber)]
    pub join: JoinMode,

    /// Report format written to stdout
    #[arg(short, long, env = "OUTLETKPI_FORMAT", value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Also write the augmented tables as CSV into this directory
    #[arg(long, env = "OUTLETKPI_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Days of sales used for the inventory coverage metric
    #[arg(long, env = "OUTLETKPI_COVERAGE_DAYS", default_value_t = DEFAULT_COVERAGE_DAYS)]
    pub coverage_days: f64,

    /// Log output format (logs go to stderr)
    #[arg(long, env = "OUTLETKPI_LOG_FORMAT", value_enum, default_value_t = LogMode::Compact)]
    pub log_format: LogMode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum JoinMode {
    /// Match rows on Item_Number
    ItemNumber,
    /// Match row i with row i (legacy behaviour)
    Positional,
}

impl From<JoinMode> for JoinStrategy {
    fn from(mode: JoinMode) -> Self {
        match mode {
            JoinMode::ItemNumber => JoinStrategy::ItemNumber,
            JoinMode::Positional => JoinStrategy::Positional,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogMode {
    Json,
    Compact,
}

impl From<LogMode> for LogFormat {
    fn from(mode: LogMode) -> Self {
        match mode {
            LogMode::Json => LogFormat::Json,
            LogMode::Compact => LogFormat::Compact,
        }
    }
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub workbook: PathBuf,
    pub join: JoinStrategy,
    pub format: ReportFormat,
    pub export_dir: Option<PathBuf>,
    pub coverage_days: f64,
}

impl Config {
    pub fn new(workbook: impl Into<PathBuf>) -> Self {
        Self {
            workbook: workbook.into(),
            join: JoinStrategy::default(),
            format: ReportFormat::Text,
            export_dir: None,
            coverage_days: DEFAULT_COVERAGE_DAYS,
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = DomainError;

    fn try_from(cli: Cli) -> DomainResult<Self> {
        if !(cli.coverage_days.is_finite() && cli.coverage_days > 0.0) {
            return Err(DomainError::validation(format!(
                "--coverage-days must be a positive number, got {}",
                cli.coverage_days
            )));
        }

        Ok(Self {
            workbook: cli.workbook,
            join: cli.join.into(),
            format: cli.format,
            export_dir: cli.export_dir,
            coverage_days: cli.coverage_days,
        })
    }
}

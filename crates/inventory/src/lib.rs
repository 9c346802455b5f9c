//! Inventory/outlet KPI domain.
//!
//! This crate turns the two renamed sheets into typed rows, derives the
//! per-item columns, correlates the two tables, and reduces them into a
//! summary report. Everything here is deterministic domain logic (no IO).

pub mod calculator;
pub mod item;
pub mod join;
pub mod outlet;
pub mod report;
pub mod summary;

pub use calculator::{DEFAULT_COVERAGE_DAYS, KpiCalculator, KpiOutcome};
pub use item::InventoryRow;
pub use join::{JoinReport, JoinStrategy, UnmatchedRow};
pub use outlet::{OutletRecord, OutletRow};
pub use report::{KpiReport, render_text};
pub use summary::{KpiSummary, SellerRef};

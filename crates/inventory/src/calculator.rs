//! KPI calculator: derived columns, join, and summary in one pass.
//!
//! Order of evaluation:
//! 1. pricing columns on every inventory row,
//! 2. monthly totals on every outlet row,
//! 3. join inventory → outlet,
//! 4. stock KPIs (turnover, sell-through, stock-to-sales, coverage) per
//!    inventory row, using its outlet row's stock snapshot,
//! 5. reductions into [`KpiSummary`].
//!
//! Inventory rows without an outlet match get zero stock KPIs.

use serde::Serialize;
use tracing::{debug, info, warn};

use outletkpi_core::{CoercionStats, DomainError, DomainResult, RawSheet};

use crate::item::InventoryRow;
use crate::join::{JoinReport, JoinStrategy, join_rows};
use crate::outlet::OutletRow;
use crate::summary::KpiSummary;

/// Days of sales the coverage metric is expressed in.
pub const DEFAULT_COVERAGE_DAYS: f64 = 30.0;

/// Everything one calculation produces: both augmented tables plus the
/// reductions and bookkeeping about zero substitutions and unmatched rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiOutcome {
    pub inventory: Vec<InventoryRow>,
    pub outlet: Vec<OutletRow>,
    pub summary: KpiSummary,
    pub join: JoinReport,
    pub coercions: CoercionStats,
}

#[derive(Debug, Clone)]
pub struct KpiCalculator {
    join_strategy: JoinStrategy,
    coverage_days: f64,
}

impl Default for KpiCalculator {
    fn default() -> Self {
        Self {
            join_strategy: JoinStrategy::default(),
            coverage_days: DEFAULT_COVERAGE_DAYS,
        }
    }
}

/// Stock KPIs for one inventory row. Cost of goods sold, average inventory
/// and inventory value are only intermediates and are not kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct StockMetrics {
    inventory_turnover: f64,
    sell_through_rate: f64,
    stock_to_sales_ratio: f64,
    inventory_coverage: f64,
}

impl KpiCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_join_strategy(mut self, strategy: JoinStrategy) -> Self {
        self.join_strategy = strategy;
        self
    }

    pub fn with_coverage_days(mut self, days: f64) -> Self {
        self.coverage_days = days;
        self
    }

    /// Parse both sheets (renaming headers) and calculate.
    pub fn calculate_sheets(&self, inventory: &RawSheet, outlet: &RawSheet) -> DomainResult<KpiOutcome> {
        let mut parse_stats = CoercionStats::default();
        let inventory_rows = InventoryRow::parse_sheet(inventory, &mut parse_stats)?;
        let outlet_rows = OutletRow::parse_sheet(outlet, &mut parse_stats)?;

        debug!(
            inventory_rows = inventory_rows.len(),
            outlet_rows = outlet_rows.len(),
            "parsed sheets"
        );

        let mut outcome = self.calculate(inventory_rows, outlet_rows)?;
        outcome.coercions.merge(&parse_stats);
        Ok(outcome)
    }

    /// Calculate every derived column and the summary.
    ///
    /// Any derived values already present on the rows are recomputed from the
    /// source fields, so running this on its own output is a no-op.
    pub fn calculate(
        &self,
        mut inventory: Vec<InventoryRow>,
        mut outlet: Vec<OutletRow>,
    ) -> DomainResult<KpiOutcome> {
        if !(self.coverage_days.is_finite() && self.coverage_days > 0.0) {
            return Err(DomainError::validation(
                "coverage_days must be a finite positive number",
            ));
        }

        let mut stats = CoercionStats::default();

        for row in &mut inventory {
            row.derive_pricing(&mut stats);
        }
        for row in &mut outlet {
            row.derive_totals();
        }

        let (pairs, join) = join_rows(&inventory, &outlet, self.join_strategy);
        log_join(&join);

        for (row, pair) in inventory.iter_mut().zip(&pairs) {
            let metrics = match pair {
                Some(o) => self.stock_metrics(row, &outlet[*o], &mut stats),
                None => StockMetrics::default(),
            };
            row.inventory_turnover = metrics.inventory_turnover;
            row.sell_through_rate = metrics.sell_through_rate;
            row.stock_to_sales_ratio = metrics.stock_to_sales_ratio;
            row.inventory_coverage = metrics.inventory_coverage;
        }

        let summary = KpiSummary::from_tables(&inventory, &outlet);

        if !stats.is_clean() {
            info!(
                degenerate_divisions = stats.degenerate_divisions,
                "division results replaced by zero"
            );
        }

        Ok(KpiOutcome {
            inventory,
            outlet,
            summary,
            join,
            coercions: stats,
        })
    }

    fn stock_metrics(
        &self,
        item: &InventoryRow,
        stock: &OutletRow,
        stats: &mut CoercionStats,
    ) -> StockMetrics {
        let cost_of_goods_sold = item.units_sold * item.outlet_price;
        let average_inventory = (stock.beginning_inventory + stock.units_in_stock) / 2.0;
        let inventory_value = stock.units_in_stock * item.outlet_price;
        let daily_sales = item.units_sold / self.coverage_days;

        StockMetrics {
            inventory_turnover: stats.divide(cost_of_goods_sold, average_inventory),
            sell_through_rate: stats
                .divide(item.units_sold, item.units_sold + stock.units_in_stock)
                * 100.0,
            stock_to_sales_ratio: stats.divide(inventory_value, item.total_sales_outlet_price),
            inventory_coverage: stats.divide(stock.units_in_stock, daily_sales),
        }
    }
}

fn log_join(join: &JoinReport) {
    debug!(strategy = ?join.strategy, matched = join.matched, "joined inventory to outlet");

    if !join.unmatched_inventory.is_empty() {
        let items: Vec<&str> = join
            .unmatched_inventory
            .iter()
            .map(|u| u.item_number.as_str())
            .collect();
        warn!(
            count = items.len(),
            items = ?items,
            "inventory rows without an outlet match; stock KPIs set to zero"
        );
    }
    if !join.unmatched_outlet.is_empty() {
        warn!(
            count = join.unmatched_outlet.len(),
            "outlet rows not referenced by any inventory row"
        );
    }
    if !join.duplicate_outlet_keys.is_empty() {
        warn!(
            keys = ?join.duplicate_outlet_keys,
            "duplicate item numbers on outlet sheet; first occurrence used"
        );
    }
}

//! Scalar reductions over the augmented tables.

use serde::{Deserialize, Serialize};

use outletkpi_core::ItemNumber;

use crate::item::InventoryRow;
use crate::outlet::OutletRow;

/// A product picked out by the best/least seller selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRef {
    pub row: usize,
    pub item_number: ItemNumber,
    pub description: String,
    pub units_sold: f64,
}

impl SellerRef {
    fn from_row(row: usize, item: &InventoryRow) -> Self {
        Self {
            row,
            item_number: item.item_number.clone(),
            description: item.description.clone(),
            units_sold: item.units_sold,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_sales_outlet: f64,
    pub total_sales_floor: f64,
    pub total_units_sold: f64,
    pub avg_selling_price: f64,
    pub avg_discount: f64,
    pub avg_inventory_turnover: f64,
    pub avg_sell_through_rate: f64,
    pub avg_stock_to_sales_ratio: f64,
    pub avg_inventory_coverage: f64,
    pub best_seller: Option<SellerRef>,
    pub least_seller: Option<SellerRef>,
    pub unsold_items: Vec<String>,
}

impl KpiSummary {
    pub fn from_tables(inventory: &[InventoryRow], outlet: &[OutletRow]) -> Self {
        Self {
            total_sales_outlet: inventory.iter().map(|r| r.total_sales_outlet_price).sum(),
            total_sales_floor: inventory.iter().map(|r| r.total_sales_floor_price).sum(),
            total_units_sold: outlet.iter().map(|r| r.total_units_sold).sum(),
            avg_selling_price: mean(inventory.iter().map(|r| r.average_selling_price)),
            avg_discount: mean(inventory.iter().map(|r| r.discount_percentage)),
            avg_inventory_turnover: mean(inventory.iter().map(|r| r.inventory_turnover)),
            avg_sell_through_rate: mean(inventory.iter().map(|r| r.sell_through_rate)),
            avg_stock_to_sales_ratio: mean(inventory.iter().map(|r| r.stock_to_sales_ratio)),
            avg_inventory_coverage: mean(inventory.iter().map(|r| r.inventory_coverage)),
            best_seller: best_seller(inventory),
            least_seller: least_seller(inventory),
            unsold_items: unsold_items(inventory),
        }
    }
}

/// Arithmetic mean; an empty column averages to zero.
fn mean(xs: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = xs.fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Row with the most units sold; ties go to the earliest row.
pub fn best_seller(inventory: &[InventoryRow]) -> Option<SellerRef> {
    pick_first_by(inventory, |candidate, current| candidate > current)
}

/// Row with the fewest units sold; ties go to the earliest row.
pub fn least_seller(inventory: &[InventoryRow]) -> Option<SellerRef> {
    pick_first_by(inventory, |candidate, current| candidate < current)
}

fn pick_first_by(
    inventory: &[InventoryRow],
    replaces: impl Fn(f64, f64) -> bool,
) -> Option<SellerRef> {
    let mut best: Option<(usize, &InventoryRow)> = None;
    for (i, row) in inventory.iter().enumerate() {
        match best {
            Some((_, current)) if !replaces(row.units_sold, current.units_sold) => {}
            _ => best = Some((i, row)),
        }
    }
    best.map(|(i, row)| SellerRef::from_row(i, row))
}

pub fn unsold_items(inventory: &[InventoryRow]) -> Vec<String> {
    inventory
        .iter()
        .filter(|r| r.is_unsold())
        .map(|r| r.description.clone())
        .collect()
}

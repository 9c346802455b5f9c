use serde::Serialize;

use outletkpi_core::columns::{
    DESCRIPTION, FLOOR_PRICE, INVENTORY_HEADER_MAP, ITEM_NUMBER, OUTLET_PRICE, UNITS_SOLD,
};
use outletkpi_core::{CoercionStats, DomainResult, ItemNumber, RawSheet};

/// One row of the `Inventario` sheet, with its derived columns.
///
/// Source fields are set at parse time. Derived fields start at zero and are
/// filled by [`InventoryRow::derive_pricing`] and the calculator's stock pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    #[serde(rename = "Item_Number")]
    pub item_number: ItemNumber,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Units_Sold")]
    pub units_sold: f64,
    #[serde(rename = "Floor_Price")]
    pub floor_price: f64,
    #[serde(rename = "Outlet_Price")]
    pub outlet_price: f64,

    #[serde(rename = "Total_Sales_Outlet_Price")]
    pub total_sales_outlet_price: f64,
    #[serde(rename = "Total_Sales_Floor_Price")]
    pub total_sales_floor_price: f64,
    #[serde(rename = "Average_Selling_Price")]
    pub average_selling_price: f64,
    #[serde(rename = "Discount_Percentage")]
    pub discount_percentage: f64,

    #[serde(rename = "Inventory_Turnover")]
    pub inventory_turnover: f64,
    #[serde(rename = "Sell_Through_Rate")]
    pub sell_through_rate: f64,
    #[serde(rename = "Stock_to_Sales_Ratio")]
    pub stock_to_sales_ratio: f64,
    #[serde(rename = "Inventory_Coverage")]
    pub inventory_coverage: f64,
}

impl InventoryRow {
    pub fn new(
        item_number: impl Into<ItemNumber>,
        description: impl Into<String>,
        units_sold: f64,
        floor_price: f64,
        outlet_price: f64,
    ) -> Self {
        Self {
            item_number: item_number.into(),
            description: description.into(),
            units_sold,
            floor_price,
            outlet_price,
            total_sales_outlet_price: 0.0,
            total_sales_floor_price: 0.0,
            average_selling_price: 0.0,
            discount_percentage: 0.0,
            inventory_turnover: 0.0,
            sell_through_rate: 0.0,
            stock_to_sales_ratio: 0.0,
            inventory_coverage: 0.0,
        }
    }

    /// Copy of the source fields only, with every derived column reset.
    pub fn source(&self) -> Self {
        Self::new(
            self.item_number.clone(),
            self.description.clone(),
            self.units_sold,
            self.floor_price,
            self.outlet_price,
        )
    }

    /// Sales totals, average selling price and discount.
    pub fn derive_pricing(&mut self, stats: &mut CoercionStats) {
        self.total_sales_outlet_price = self.outlet_price * self.units_sold;
        self.total_sales_floor_price = self.floor_price * self.units_sold;
        self.average_selling_price = stats.divide(self.total_sales_outlet_price, self.units_sold);
        self.discount_percentage =
            stats.divide(self.floor_price - self.outlet_price, self.floor_price) * 100.0;
    }

    pub fn is_unsold(&self) -> bool {
        self.units_sold == 0.0
    }

    /// Parse the `Inventario` sheet. Headers are renamed to canonical names
    /// first; numeric cells that do not parse become zero.
    pub fn parse_sheet(sheet: &RawSheet, stats: &mut CoercionStats) -> DomainResult<Vec<Self>> {
        let sheet = sheet.clone().renamed(INVENTORY_HEADER_MAP);

        let item_col = sheet.require_column(ITEM_NUMBER)?;
        let desc_col = sheet.require_column(DESCRIPTION)?;
        let units_col = sheet.require_column(UNITS_SOLD)?;
        let floor_col = sheet.require_column(FLOOR_PRICE)?;
        let outlet_col = sheet.require_column(OUTLET_PRICE)?;

        let rows = (0..sheet.len())
            .map(|r| {
                Self::new(
                    ItemNumber::from_cell(sheet.cell(r, item_col)),
                    sheet.cell(r, desc_col).display_text(),
                    stats.number(sheet.cell(r, units_col)),
                    stats.number(sheet.cell(r, floor_col)),
                    stats.number(sheet.cell(r, outlet_col)),
                )
            })
            .collect();

        Ok(rows)
    }
}

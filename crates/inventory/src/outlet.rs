use serde::Serialize;

use outletkpi_core::columns::{
    DESCRIPTION, ITEM_NUMBER, MONTHLY_COLUMNS, OUTLET_HEADER_MAP, TOTAL_ANNUAL_SALES,
    UNITS_IN_STOCK,
};
use outletkpi_core::{CoercionKind, CoercionStats, DomainResult, ItemNumber, RawSheet, coerce_number};

/// One row of the `Outlet` sheet: nine months of unit sales plus the stock
/// snapshot taken at the start of October.
///
/// Serializes as a flat [`OutletRecord`], one column per month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "OutletRecord")]
pub struct OutletRow {
    pub item_number: ItemNumber,
    pub description: String,
    /// Units sold per month, in [`MONTHLY_COLUMNS`] order.
    pub monthly_units: [f64; 9],
    /// Carried through from the sheet as-is; not used by any metric. `None`
    /// when the column is absent or the cell is blank.
    pub total_annual_sales: Option<f64>,
    pub units_in_stock: f64,

    pub total_units_sold: f64,
    pub beginning_inventory: f64,
}

/// Flat, canonically named view of an [`OutletRow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutletRecord {
    #[serde(rename = "Item_Number")]
    pub item_number: ItemNumber,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Enero")]
    pub enero: f64,
    #[serde(rename = "Febrero")]
    pub febrero: f64,
    #[serde(rename = "Marzo")]
    pub marzo: f64,
    #[serde(rename = "Abril")]
    pub abril: f64,
    #[serde(rename = "Mayo")]
    pub mayo: f64,
    #[serde(rename = "Junio")]
    pub junio: f64,
    #[serde(rename = "Julio")]
    pub julio: f64,
    #[serde(rename = "Agosto")]
    pub agosto: f64,
    #[serde(rename = "Septiembre")]
    pub septiembre: f64,
    #[serde(rename = "Total_Annual_Sales")]
    pub total_annual_sales: Option<f64>,
    #[serde(rename = "Units_In_Stock")]
    pub units_in_stock: f64,
    #[serde(rename = "Total_Units_Sold")]
    pub total_units_sold: f64,
    #[serde(rename = "Beginning_Inventory")]
    pub beginning_inventory: f64,
}

impl From<OutletRow> for OutletRecord {
    fn from(row: OutletRow) -> Self {
        let [enero, febrero, marzo, abril, mayo, junio, julio, agosto, septiembre] =
            row.monthly_units;
        Self {
            item_number: row.item_number,
            description: row.description,
            enero,
            febrero,
            marzo,
            abril,
            mayo,
            junio,
            julio,
            agosto,
            septiembre,
            total_annual_sales: row.total_annual_sales,
            units_in_stock: row.units_in_stock,
            total_units_sold: row.total_units_sold,
            beginning_inventory: row.beginning_inventory,
        }
    }
}

impl OutletRow {
    pub fn new(
        item_number: impl Into<ItemNumber>,
        description: impl Into<String>,
        monthly_units: [f64; 9],
        units_in_stock: f64,
    ) -> Self {
        Self {
            item_number: item_number.into(),
            description: description.into(),
            monthly_units,
            total_annual_sales: None,
            units_in_stock,
            total_units_sold: 0.0,
            beginning_inventory: 0.0,
        }
    }

    pub fn with_total_annual_sales(mut self, total: f64) -> Self {
        self.total_annual_sales = Some(total);
        self
    }

    pub fn source(&self) -> Self {
        Self {
            total_units_sold: 0.0,
            beginning_inventory: 0.0,
            ..self.clone()
        }
    }

    pub fn derive_totals(&mut self) {
        self.total_units_sold = self.monthly_units.iter().sum();
        self.beginning_inventory = self.total_units_sold + self.units_in_stock;
    }

    /// Parse the `Outlet` sheet. A missing month column is an error; a
    /// malformed month cell reads as zero.
    pub fn parse_sheet(sheet: &RawSheet, stats: &mut CoercionStats) -> DomainResult<Vec<Self>> {
        let sheet = sheet.clone().renamed(OUTLET_HEADER_MAP);

        let item_col = sheet.require_column(ITEM_NUMBER)?;
        let desc_col = sheet.require_column(DESCRIPTION)?;
        let stock_col = sheet.require_column(UNITS_IN_STOCK)?;
        let annual_col = sheet.column_index(TOTAL_ANNUAL_SALES);

        let mut month_cols = [0usize; 9];
        for (slot, month) in month_cols.iter_mut().zip(MONTHLY_COLUMNS) {
            *slot = sheet.require_column(month)?;
        }

        let rows = (0..sheet.len())
            .map(|r| {
                let monthly_units = month_cols.map(|c| stats.number(sheet.cell(r, c)));
                let row = Self::new(
                    ItemNumber::from_cell(sheet.cell(r, item_col)),
                    sheet.cell(r, desc_col).display_text(),
                    monthly_units,
                    stats.number(sheet.cell(r, stock_col)),
                );
                // Passthrough column: not counted in the coercion stats.
                let annual = annual_col.map(|c| coerce_number(sheet.cell(r, c)));
                match annual {
                    Some(coerced) if coerced.kind != CoercionKind::Missing => {
                        row.with_total_annual_sales(coerced.value)
                    }
                    _ => row,
                }
            })
            .collect();

        Ok(rows)
    }
}

//! Sheet names, canonical column names, and the source-header mappings.
//!
//! The mappings reproduce the workbook's Spanish headers exactly. Headers that
//! are not listed pass through unchanged (the monthly columns, for example).

/// Sheet holding per-item pricing and quantities.
pub const INVENTORY_SHEET: &str = "Inventario";

/// Sheet holding monthly outlet sales and the stock snapshot.
pub const OUTLET_SHEET: &str = "Outlet";

pub const REQUIRED_SHEETS: [&str; 2] = [INVENTORY_SHEET, OUTLET_SHEET];

pub const ITEM_NUMBER: &str = "Item_Number";
pub const DESCRIPTION: &str = "Description";
pub const UNITS_SOLD: &str = "Units_Sold";
pub const FLOOR_PRICE: &str = "Floor_Price";
pub const OUTLET_PRICE: &str = "Outlet_Price";
pub const TOTAL_ANNUAL_SALES: &str = "Total_Annual_Sales";
pub const UNITS_IN_STOCK: &str = "Units_In_Stock";

/// Monthly unit-sold columns on the outlet sheet, January through September.
pub const MONTHLY_COLUMNS: [&str; 9] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
];

/// Inventory sheet: source header → canonical name.
pub const INVENTORY_HEADER_MAP: &[(&str, &str)] = &[
    ("Codigo", ITEM_NUMBER),
    ("Descripcion", DESCRIPTION),
    ("Stock", UNITS_SOLD),
    ("Precio Sala", FLOOR_PRICE),
    ("Outlet", OUTLET_PRICE),
];

/// Outlet sheet: source header → canonical name.
pub const OUTLET_HEADER_MAP: &[(&str, &str)] = &[
    ("Número de artículo", ITEM_NUMBER),
    ("Descripción del artículo", DESCRIPTION),
    ("Total anual", TOTAL_ANNUAL_SALES),
    ("Stock al 1 de oct", UNITS_IN_STOCK),
];

/// Map a single header through `map`, trimming surrounding whitespace.
pub fn canonical_header(header: &str, map: &[(&str, &str)]) -> String {
    let trimmed = header.trim();
    map.iter()
        .find(|(source, _)| *source == trimmed)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

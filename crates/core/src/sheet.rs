//! Raw sheet: a header row plus data rows, as produced by a loader.

use crate::cell::CellValue;
use crate::columns::canonical_header;
use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Rename headers in place according to `map` (source → canonical).
    pub fn rename_columns(&mut self, map: &[(&str, &str)]) {
        for header in &mut self.headers {
            *header = canonical_header(header, map);
        }
    }

    /// Consuming variant of [`RawSheet::rename_columns`].
    pub fn renamed(mut self, map: &[(&str, &str)]) -> Self {
        self.rename_columns(map);
        self
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like [`RawSheet::column_index`], but a missing column is an error.
    pub fn require_column(&self, name: &str) -> DomainResult<usize> {
        self.column_index(name)
            .ok_or_else(|| DomainError::missing_column(&self.name, name))
    }

    /// Cell at (`row`, `col`); short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{INVENTORY_HEADER_MAP, ITEM_NUMBER, UNITS_SOLD};

    fn sheet() -> RawSheet {
        RawSheet::new(
            "Inventario",
            vec!["Codigo".into(), "Stock".into()],
            vec![vec![CellValue::text("A1")]],
        )
    }

    #[test]
    fn rename_then_lookup_by_canonical_name() {
        let s = sheet().renamed(INVENTORY_HEADER_MAP);
        assert_eq!(s.column_index(ITEM_NUMBER), Some(0));
        assert_eq!(s.column_index(UNITS_SOLD), Some(1));
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let s = sheet();
        assert_eq!(s.cell(0, 1), &CellValue::Empty);
        assert_eq!(s.cell(5, 0), &CellValue::Empty);
    }

    #[test]
    fn missing_column_names_sheet_and_column() {
        let err = sheet().require_column("Floor_Price").unwrap_err();
        assert_eq!(
            err,
            DomainError::missing_column("Inventario", "Floor_Price")
        );
    }
}

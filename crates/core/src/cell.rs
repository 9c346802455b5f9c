//! Spreadsheet cell values, independent of any reader library.

use serde::{Deserialize, Serialize};

/// A single cell as handed over by a loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    /// ISO 8601 rendering of a date/time cell.
    DateTime(String),
    Error(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Human-readable rendering used for descriptions and keys.
    ///
    /// Integral numbers drop their fractional part so that an item code stored
    /// as `1001.0` reads as `1001`.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number_text(*n),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::DateTime(s) => s.clone(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

fn format_number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

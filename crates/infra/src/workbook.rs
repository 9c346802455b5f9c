//! Workbook loading via calamine.

use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use outletkpi_core::columns::{INVENTORY_SHEET, OUTLET_SHEET, REQUIRED_SHEETS};
use outletkpi_core::{CellValue, RawSheet};

use crate::error::LoadError;

/// The two sheets the calculator needs, with headers still in their source
/// language.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSheets {
    pub path: PathBuf,
    pub inventory: RawSheet,
    pub outlet: RawSheet,
}

/// Open `path` (xlsx, xls, xlsb or ods), check both required sheets exist and
/// read them.
pub fn load_workbook(path: impl AsRef<Path>) -> Result<WorkbookSheets, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    debug!(path = %path.display(), sheets = ?sheet_names, "opened workbook");

    let mut missing: Vec<String> = REQUIRED_SHEETS
        .iter()
        .filter(|required| !sheet_names.iter().any(|name| name.as_str() == **required))
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(LoadError::MissingSheets(missing));
    }

    let inventory = read_sheet(&mut workbook, INVENTORY_SHEET)?;
    let outlet = read_sheet(&mut workbook, OUTLET_SHEET)?;

    info!(
        path = %path.display(),
        inventory_rows = inventory.len(),
        outlet_rows = outlet.len(),
        "loaded workbook"
    );

    Ok(WorkbookSheets {
        path: path.to_path_buf(),
        inventory,
        outlet,
    })
}

fn read_sheet<RS>(workbook: &mut Sheets<RS>, name: &str) -> Result<RawSheet, LoadError>
where
    RS: std::io::Read + std::io::Seek,
{
    let range = workbook
        .worksheet_range(name)
        .map_err(|source| LoadError::Sheet {
            sheet: name.to_string(),
            source,
        })?;
    Ok(range_to_sheet(name, &range))
}

/// First row is the header row; rows with no content at all are dropped.
fn range_to_sheet(name: &str, range: &Range<Data>) -> RawSheet {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|c| convert_cell(c).display_text())
                .collect()
        })
        .unwrap_or_default();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(CellValue::is_empty))
        .collect();

    RawSheet::new(name, headers, data)
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::DateTime(format_excel_datetime(dt.as_f64())),
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(format!("{e:?}")),
    }
}

/// Excel serial date (days since 1899-12-30) to ISO 8601.
fn format_excel_datetime(value: f64) -> String {
    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return value.to_string();
    };
    let seconds = (value * 86_400.0).round() as i64;
    match epoch
        .and_hms_opt(0, 0, 0)
        .and_then(|start| Duration::try_seconds(seconds).and_then(|d| start.checked_add_signed(d)))
    {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => value.to_string(),
    }
}

//! CSV export of the augmented tables.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use outletkpi_inventory::{InventoryRow, OutletRow};

use crate::error::ExportError;

pub const INVENTORY_CSV: &str = "inventory_data.csv";
pub const OUTLET_CSV: &str = "outlet_data.csv";

/// Write both tables into `dir` (created if needed). Returns the file paths.
pub fn export_tables(
    dir: impl AsRef<Path>,
    inventory: &[InventoryRow],
    outlet: &[OutletRow],
) -> Result<(PathBuf, PathBuf), ExportError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let inventory_path = dir.join(INVENTORY_CSV);
    let outlet_path = dir.join(OUTLET_CSV);
    write_inventory_csv(&inventory_path, inventory)?;
    write_outlet_csv(&outlet_path, outlet)?;

    info!(dir = %dir.display(), "exported augmented tables");
    Ok((inventory_path, outlet_path))
}

pub fn write_inventory_csv(path: &Path, rows: &[InventoryRow]) -> Result<(), ExportError> {
    write_csv(path, rows)
}

/// Months are written as one column each (`Enero`..`Septiembre`).
pub fn write_outlet_csv(path: &Path, rows: &[OutletRow]) -> Result<(), ExportError> {
    write_csv(path, rows)
}

/// The header row comes from the first record's field names, so an empty
/// table produces an empty file.
fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    let wrap = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    for row in rows {
        writer.serialize(row).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}

//! Infrastructure layer: spreadsheet loading and file export.
//!
//! The domain crates never touch the filesystem; this crate turns a workbook
//! on disk into [`outletkpi_core::RawSheet`]s and writes augmented tables out.

pub mod error;
pub mod export;
pub mod workbook;

pub use error::{ExportError, LoadError};
pub use export::{export_tables, write_inventory_csv, write_outlet_csv};
pub use workbook::{WorkbookSheets, load_workbook};

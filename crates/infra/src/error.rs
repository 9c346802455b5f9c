use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the input sheets. Always fatal for a run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("workbook not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Sorted list of required sheets the workbook lacks.
    #[error("missing required sheets: {}", .0.join(", "))]
    MissingSheets(Vec<String>),

    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

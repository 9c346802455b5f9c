//! `outletkpi-core`: building blocks shared by the KPI pipeline.
//!
//! This crate contains **pure** primitives (no IO): cell values, raw sheets,
//! canonical column names, item keys, and the safe-parse/safe-divide rules
//! every derived metric relies on.

pub mod cell;
pub mod columns;
pub mod error;
pub mod id;
pub mod numeric;
pub mod sheet;

pub use cell::CellValue;
pub use error::{DomainError, DomainResult};
pub use id::ItemNumber;
pub use numeric::{CoercionKind, CoercionStats, Coerced, coerce_number, safe_divide};
pub use sheet::RawSheet;

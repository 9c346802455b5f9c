//! Item identifiers used to correlate the inventory and outlet sheets.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::DomainError;

/// Normalized item number (join key).
///
/// Text is trimmed and integral numeric cells are rendered without a fraction,
/// so `" 1001 "` and `1001.0` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemNumber(String);

impl ItemNumber {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn from_cell(cell: &CellValue) -> Self {
        Self::new(cell.display_text())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank keys never participate in a join.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl FromStr for ItemNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self::new(s);
        if id.is_blank() {
            return Err(DomainError::validation("item number cannot be blank"));
        }
        Ok(id)
    }
}

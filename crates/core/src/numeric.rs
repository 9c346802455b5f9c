//! Safe-parse and safe-divide.
//!
//! The pipeline is total over arbitrary spreadsheet content: a cell that is not
//! a number reads as `0.0`, and a division whose result is not finite yields
//! `0.0`. Both rules are applied uniformly through the functions here, and
//! [`CoercionStats`] keeps count of how often they fired.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Divide, mapping `±inf` and `NaN` (including `0/0`) to `0.0`.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    let q = numerator / denominator;
    if q.is_finite() { q } else { 0.0 }
}

/// How a numeric cell was read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoercionKind {
    Parsed,
    /// Empty cell, coerced to zero.
    Missing,
    /// Non-numeric content, coerced to zero.
    Malformed,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coerced {
    pub value: f64,
    pub kind: CoercionKind,
}

impl Coerced {
    fn parsed(value: f64) -> Self {
        Self {
            value,
            kind: CoercionKind::Parsed,
        }
    }

    fn zero(kind: CoercionKind) -> Self {
        Self { value: 0.0, kind }
    }
}

/// Read a cell as a number; anything that is not a finite number becomes `0.0`.
pub fn coerce_number(cell: &CellValue) -> Coerced {
    match cell {
        CellValue::Number(n) if n.is_finite() => Coerced::parsed(*n),
        CellValue::Number(_) => Coerced::zero(CoercionKind::Malformed),
        CellValue::Empty => Coerced::zero(CoercionKind::Missing),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Coerced::zero(CoercionKind::Missing);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Coerced::parsed(n),
                _ => Coerced::zero(CoercionKind::Malformed),
            }
        }
        CellValue::Boolean(_) | CellValue::DateTime(_) | CellValue::Error(_) => {
            Coerced::zero(CoercionKind::Malformed)
        }
    }
}

/// Counters for values that were silently replaced by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionStats {
    pub malformed_cells: u64,
    pub missing_cells: u64,
    pub degenerate_divisions: u64,
}

impl CoercionStats {
    /// Coerce a cell and record the outcome.
    pub fn number(&mut self, cell: &CellValue) -> f64 {
        let c = coerce_number(cell);
        match c.kind {
            CoercionKind::Parsed => {}
            CoercionKind::Missing => self.missing_cells += 1,
            CoercionKind::Malformed => self.malformed_cells += 1,
        }
        c.value
    }

    /// [`safe_divide`], counting results that had to be replaced.
    pub fn divide(&mut self, numerator: f64, denominator: f64) -> f64 {
        if !(numerator / denominator).is_finite() {
            self.degenerate_divisions += 1;
        }
        safe_divide(numerator, denominator)
    }

    pub fn merge(&mut self, other: &CoercionStats) {
        self.malformed_cells += other.malformed_cells;
        self.missing_cells += other.missing_cells;
        self.degenerate_divisions += other.degenerate_divisions;
    }

    pub fn is_clean(&self) -> bool {
        *self == CoercionStats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn division_by_zero_yields_zero() {
        assert_eq!(safe_divide(10.0, 0.0), 0.0);
        assert_eq!(safe_divide(-10.0, 0.0), 0.0);
        assert_eq!(safe_divide(0.0, 0.0), 0.0);
        assert_eq!(safe_divide(10.0, 4.0), 2.5);
    }

    #[test]
    fn text_prices_parse_and_garbage_coerces_to_zero() {
        assert_eq!(coerce_number(&CellValue::text(" 12.50 ")).value, 12.5);

        let c = coerce_number(&CellValue::text("N/A"));
        assert_eq!(c.value, 0.0);
        assert_eq!(c.kind, CoercionKind::Malformed);

        let c = coerce_number(&CellValue::text("inf"));
        assert_eq!(c.value, 0.0);
        assert_eq!(c.kind, CoercionKind::Malformed);

        assert_eq!(coerce_number(&CellValue::Empty).kind, CoercionKind::Missing);
        assert_eq!(coerce_number(&CellValue::Boolean(true)).value, 0.0);
    }

    #[test]
    fn stats_count_every_zero_substitution() {
        let mut stats = CoercionStats::default();
        stats.number(&CellValue::Number(3.0));
        stats.number(&CellValue::text("abc"));
        stats.number(&CellValue::Empty);
        stats.divide(1.0, 0.0);
        stats.divide(1.0, 2.0);

        assert_eq!(stats.malformed_cells, 1);
        assert_eq!(stats.missing_cells, 1);
        assert_eq!(stats.degenerate_divisions, 1);
        assert!(!stats.is_clean());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: safe_divide always returns a finite number.
        #[test]
        fn safe_divide_is_total(n in any::<f64>(), d in any::<f64>()) {
            prop_assert!(safe_divide(n, d).is_finite());
        }

        /// Property: any text cell coerces to a finite number without panicking.
        #[test]
        fn coercion_is_total_over_text(s in ".*") {
            prop_assert!(coerce_number(&CellValue::Text(s)).value.is_finite());
        }
    }
}

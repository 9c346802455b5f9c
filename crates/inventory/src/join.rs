//! Correlating inventory rows with outlet rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use outletkpi_core::ItemNumber;

use crate::item::InventoryRow;
use crate::outlet::OutletRow;

/// How inventory rows find their outlet counterpart.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Match on the normalized `Item_Number`.
    #[default]
    ItemNumber,
    /// Row `i` of one sheet pairs with row `i` of the other. Reproduces the
    /// legacy report exactly, including its mismatches when sheets are not
    /// sorted identically.
    Positional,
}

/// A row (0-based data row index) that did not take part in a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedRow {
    pub row: usize,
    pub item_number: ItemNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReport {
    pub strategy: JoinStrategy,
    pub matched: usize,
    pub unmatched_inventory: Vec<UnmatchedRow>,
    pub unmatched_outlet: Vec<UnmatchedRow>,
    /// Outlet keys seen more than once; the first occurrence wins.
    pub duplicate_outlet_keys: Vec<ItemNumber>,
}

impl JoinReport {
    pub fn is_complete(&self) -> bool {
        self.unmatched_inventory.is_empty()
            && self.unmatched_outlet.is_empty()
            && self.duplicate_outlet_keys.is_empty()
    }
}

/// For each inventory row, the index of its outlet row (if any).
pub fn join_rows(
    inventory: &[InventoryRow],
    outlet: &[OutletRow],
    strategy: JoinStrategy,
) -> (Vec<Option<usize>>, JoinReport) {
    let pairs = match strategy {
        JoinStrategy::ItemNumber => join_by_item_number(inventory, outlet),
        JoinStrategy::Positional => (0..inventory.len())
            .map(|i| (i < outlet.len()).then_some(i))
            .collect(),
    };

    let mut report = JoinReport {
        strategy,
        ..JoinReport::default()
    };

    let mut outlet_used = vec![false; outlet.len()];
    for (row, pair) in pairs.iter().enumerate() {
        match pair {
            Some(o) => {
                report.matched += 1;
                outlet_used[*o] = true;
            }
            None => report.unmatched_inventory.push(UnmatchedRow {
                row,
                item_number: inventory[row].item_number.clone(),
            }),
        }
    }

    report.unmatched_outlet = outlet_used
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(row, _)| UnmatchedRow {
            row,
            item_number: outlet[row].item_number.clone(),
        })
        .collect();

    if strategy == JoinStrategy::ItemNumber {
        report.duplicate_outlet_keys = duplicate_keys(outlet);
    }

    (pairs, report)
}

fn join_by_item_number(inventory: &[InventoryRow], outlet: &[OutletRow]) -> Vec<Option<usize>> {
    let mut index: HashMap<&ItemNumber, usize> = HashMap::with_capacity(outlet.len());
    for (i, row) in outlet.iter().enumerate() {
        if !row.item_number.is_blank() {
            index.entry(&row.item_number).or_insert(i);
        }
    }

    inventory
        .iter()
        .map(|row| index.get(&row.item_number).copied())
        .collect()
}

fn duplicate_keys(outlet: &[OutletRow]) -> Vec<ItemNumber> {
    let mut seen: HashMap<&ItemNumber, usize> = HashMap::new();
    let mut dups = Vec::new();
    for row in outlet.iter().filter(|r| !r.item_number.is_blank()) {
        let count = seen.entry(&row.item_number).or_insert(0);
        *count += 1;
        if *count == 2 {
            dups.push(row.item_number.clone());
        }
    }
    dups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(id: &str) -> InventoryRow {
        InventoryRow::new(id, id, 1.0, 1.0, 1.0)
    }

    fn out(id: &str) -> OutletRow {
        OutletRow::new(id, id, [0.0; 9], 1.0)
    }

    #[test]
    fn item_number_join_ignores_row_order() {
        let inventory = vec![inv("A"), inv("B")];
        let outlet = vec![out("B"), out("A")];

        let (pairs, report) = join_rows(&inventory, &outlet, JoinStrategy::ItemNumber);
        assert_eq!(pairs, vec![Some(1), Some(0)]);
        assert_eq!(report.matched, 2);
        assert!(report.is_complete());
    }

    #[test]
    fn unmatched_rows_are_reported_on_both_sides() {
        let inventory = vec![inv("A"), inv("Z"), inv("")];
        let outlet = vec![out("A"), out("Q"), out("")];

        let (pairs, report) = join_rows(&inventory, &outlet, JoinStrategy::ItemNumber);
        assert_eq!(pairs, vec![Some(0), None, None]);
        assert_eq!(
            report
                .unmatched_inventory
                .iter()
                .map(|u| u.row)
                .collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(
            report.unmatched_outlet.iter().map(|u| u.row).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn duplicate_outlet_keys_resolve_to_first_occurrence() {
        let inventory = vec![inv("A")];
        let outlet = vec![out("A"), out("A"), out("A")];

        let (pairs, report) = join_rows(&inventory, &outlet, JoinStrategy::ItemNumber);
        assert_eq!(pairs, vec![Some(0)]);
        assert_eq!(report.duplicate_outlet_keys, vec![ItemNumber::from("A")]);
        assert!(!report.is_complete());
    }

    #[test]
    fn positional_join_pairs_by_index_and_ignores_keys() {
        let inventory = vec![inv("A"), inv("B"), inv("C")];
        let outlet = vec![out("X"), out("Y")];

        let (pairs, report) = join_rows(&inventory, &outlet, JoinStrategy::Positional);
        assert_eq!(pairs, vec![Some(0), Some(1), None]);
        assert_eq!(report.unmatched_inventory.len(), 1);
        assert!(report.unmatched_outlet.is_empty());
        assert!(report.duplicate_outlet_keys.is_empty());
    }
}

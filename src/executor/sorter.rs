//! Result ordering
//!
//! Stable multi-key sort over projection positions.

use std::cmp::Ordering;

use super::result::Row;
use crate::functions::Value;
use crate::parser::{OrderKey, SortDirection};

/// Sorts result rows
pub struct RowSorter;

impl RowSorter {
    /// Sorts rows by `keys` in declaration order.
    ///
    /// Stable: rows equal on every key keep their relative order. A key
    /// whose position is missing from a row compares as Empty.
    pub fn sort(rows: &mut [Row], keys: &[OrderKey]) {
        if keys.is_empty() {
            return;
        }
        rows.sort_by(|a, b| Self::compare(a, b, keys));
    }

    fn compare(a: &Row, b: &Row, keys: &[OrderKey]) -> Ordering {
        for key in keys {
            let a_val = a.at(key.position).unwrap_or(&Value::Empty);
            let b_val = b.at(key.position).unwrap_or(&Value::Empty);

            let ordering = match key.direction {
                SortDirection::Asc => a_val.compare_to(b_val),
                SortDirection::Desc => a_val.compare_to(b_val).reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

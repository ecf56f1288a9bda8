//! Vendor identification
//!
//! A vendor sheet names its vendor in the data, not the tab name: the
//! first column whose header mentions "vendor" or "contractor" holds
//! it, and the most frequent normalized value wins.

use std::collections::HashMap;

use crate::sheets::{SheetTable, normalize_text};

/// First column (in sheet order) whose normalized header contains
/// "vendor" or "contractor"
pub fn find_vendor_column(table: &SheetTable) -> Option<&str> {
    table
        .headers
        .iter()
        .find(|h| h.contains("vendor") || h.contains("contractor"))
        .map(|h| h.as_str())
}

/// Infer the vendor identity of a sheet by majority vote over its
/// vendor-marker column. Ties break to the lexicographically smallest
/// value so the result is deterministic. `None` when the column is
/// absent or holds no non-null values.
pub fn identify_vendor(table: &SheetTable) -> Option<String> {
    let column = find_vendor_column(table)?;
    let col_idx = table.column_index(column)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in &table.rows {
        let Some(cell) = row.get(col_idx) else {
            continue;
        };
        if cell.is_null() {
            continue;
        }
        let value = normalize_text(&cell.to_display());
        if !value.is_empty() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(value, _)| value)
}

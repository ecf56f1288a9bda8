//! Row-level join and comparison
//!
//! Joins vendor and system records on the resolved employee key, aligns
//! field names through the column mapping, and produces per-field
//! verdicts, the missing-employee report and the headcount summary.

use std::collections::HashMap;

use crate::services::matching::ColumnMapping;
use crate::sheets::SheetTable;

use super::compare::{ComparePolicy, numeric_diff};
use super::models::{FieldDiff, Headcount, MissingEmployee, ReconResult, Side};

/// Index a table's rows by the normalized string form of the key
/// column. Rows with empty keys are ignored; duplicate keys keep the
/// last row.
fn key_index(table: &SheetTable, key_column: &str) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    let Some(col) = table.column_index(key_column) else {
        return index;
    };

    for (row_idx, row) in table.rows.iter().enumerate() {
        let Some(cell) = row.get(col) else { continue };
        let key = cell.key_string();
        if key.is_empty() {
            continue;
        }
        if let Some(previous) = index.insert(key.clone(), row_idx) {
            log::debug!(
                "Sheet '{}': duplicate key '{}' (row {} replaces row {})",
                table.name,
                key,
                row_idx,
                previous
            );
        }
    }

    index
}

/// Join vendor rows against the vendor-filtered system rows and compare
/// every mapped column pair present on both sides.
pub fn reconcile_rows(
    vendor: &SheetTable,
    system: &SheetTable,
    mapping: &ColumnMapping,
    vendor_key: &str,
    system_key: &str,
    policy: &ComparePolicy,
    vendor_name: &str,
) -> ReconResult {
    let vendor_index = key_index(vendor, vendor_key);
    let system_index = key_index(system, system_key);

    let mut matched_keys: Vec<&String> = vendor_index
        .keys()
        .filter(|k| system_index.contains_key(*k))
        .collect();
    matched_keys.sort();

    let mut vendor_only: Vec<&String> = vendor_index
        .keys()
        .filter(|k| !system_index.contains_key(*k))
        .collect();
    vendor_only.sort();

    let mut system_only: Vec<&String> = system_index
        .keys()
        .filter(|k| !vendor_index.contains_key(*k))
        .collect();
    system_only.sort();

    let headcount = Headcount {
        vendor: vendor_name.to_string(),
        vendor_count: vendor_index.len(),
        system_count: system_index.len(),
        matching: matched_keys.len(),
        only_in_vendor: vendor_only.len(),
        only_in_system: system_only.len(),
    };

    // Compared pairs: every mapped column present in both filtered
    // row-sets, except the join key itself
    let pairs: Vec<(&str, &str)> = mapping
        .mapped_pairs()
        .filter(|(v, _)| *v != vendor_key)
        .filter(|(v, s)| vendor.column_index(v).is_some() && system.column_index(s).is_some())
        .collect();

    let mut diffs = Vec::new();
    let mut mismatch_counts: Vec<(String, usize)> = Vec::new();
    let mut verdicts = 0usize;
    let mut matches = 0usize;

    for (vendor_col, system_col) in &pairs {
        let mut mismatches = 0usize;

        for key in &matched_keys {
            let vendor_row = &vendor.rows[vendor_index[*key]];
            let system_row = &system.rows[system_index[*key]];

            let vendor_value = vendor.value(vendor_row, vendor_col);
            let system_value = system.value(system_row, system_col);

            let matched = policy.values_match(vendor_col, &vendor_value, &system_value);
            let difference = numeric_diff(&vendor_value, &system_value);

            verdicts += 1;
            if matched {
                matches += 1;
            } else {
                mismatches += 1;
            }

            diffs.push(FieldDiff {
                employee_id: (*key).clone(),
                column: vendor_col.to_string(),
                vendor_value,
                system_value,
                matched,
                difference,
            });
        }

        mismatch_counts.push((vendor_col.to_string(), mismatches));
    }

    let mut missing: Vec<MissingEmployee> = Vec::new();
    for key in vendor_only {
        missing.push(MissingEmployee {
            employee_id: key.clone(),
            missing_in: Side::System,
        });
    }
    for key in system_only {
        missing.push(MissingEmployee {
            employee_id: key.clone(),
            missing_in: Side::Vendor,
        });
    }

    let match_rate = if verdicts > 0 {
        Some(matches as f64 / verdicts as f64)
    } else {
        None
    };

    ReconResult {
        diffs,
        missing,
        mismatch_counts,
        headcount,
        match_rate,
    }
}

//! Per-sheet reconciliation pipeline
//!
//! Orchestrates one vendor sheet through column matching, employee-key
//! resolution, vendor identification, system-row filtering and the row
//! comparison. Errors are isolated per sheet so the batch continues
//! over the remaining sheets.

pub mod compare;
pub mod key;
pub mod models;
pub mod rows;
pub mod vendor;

pub use compare::{ComparePolicy, ComparisonMode};
pub use key::{KeyColumnSelector, first_candidate, resolve_key_columns};
pub use models::{FieldDiff, Headcount, MissingEmployee, ReconResult, SheetReport, Side};
pub use rows::reconcile_rows;
pub use vendor::{find_vendor_column, identify_vendor};

use crate::services::matching::{self, OracleError, SemanticOracle};
use crate::sheets::{SheetTable, normalize_text};

/// Why a vendor sheet produced no comparison
#[derive(Debug)]
pub enum SheetError {
    /// No vendor/contractor column, or no usable values in it
    VendorUndetected { sheet: String },
    /// No employee-identifier candidate among the mapped columns
    NoKeyColumn { sheet: String, available: Vec<String> },
    /// The semantic oracle failed for this sheet's mapping step
    Oracle { sheet: String, source: OracleError },
}

impl SheetError {
    /// Skip reasons are expected and reported as warnings; the rest are
    /// per-sheet aborts.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            SheetError::VendorUndetected { .. } | SheetError::NoKeyColumn { .. }
        )
    }
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::VendorUndetected { sheet } => {
                write!(
                    f,
                    "could not detect a vendor name from the data in sheet '{}'",
                    sheet
                )
            }
            SheetError::NoKeyColumn { sheet, available } => {
                write!(
                    f,
                    "no employee ID column among the mapped columns of sheet '{}' (mapped: {})",
                    sheet,
                    available.join(", ")
                )
            }
            SheetError::Oracle { sheet, source } => {
                write!(f, "header mapping failed for sheet '{}': {}", sheet, source)
            }
        }
    }
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetError::Oracle { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Restrict the system table to rows belonging to `vendor_name`.
///
/// When the system sheet has no vendor-marker column the whole table is
/// eligible, as a copy; the loaded system table itself is never mutated.
pub fn filter_system_rows(system: &SheetTable, vendor_name: &str) -> SheetTable {
    match find_vendor_column(system) {
        Some(column) => {
            let col = system
                .column_index(column)
                .expect("vendor column comes from this table's headers");
            system.filtered(|row| {
                row.get(col)
                    .map(|cell| normalize_text(&cell.to_display()) == vendor_name)
                    .unwrap_or(false)
            })
        }
        None => system.clone(),
    }
}

/// Run the full reconciliation pipeline for one vendor sheet.
///
/// The system table is filtered (immutably, via a copy) to the rows of
/// the identified vendor before joining.
pub async fn process_sheet(
    sheet: &SheetTable,
    system: &SheetTable,
    oracle: &dyn SemanticOracle,
    policy: &ComparePolicy,
    selector: &KeyColumnSelector<'_>,
) -> Result<SheetReport, SheetError> {
    let outcome = matching::match_columns(&sheet.headers, &system.headers, oracle)
        .await
        .map_err(|source| SheetError::Oracle {
            sheet: sheet.name.clone(),
            source,
        })?;

    let (vendor_key, system_key) =
        resolve_key_columns(&outcome.mapping, selector).ok_or_else(|| SheetError::NoKeyColumn {
            sheet: sheet.name.clone(),
            available: outcome
                .mapping
                .mapped_pairs()
                .map(|(v, _)| v.to_string())
                .collect(),
        })?;
    log::info!(
        "Sheet '{}': joining on '{}' -> '{}'",
        sheet.name,
        vendor_key,
        system_key
    );

    let vendor_name = identify_vendor(sheet).ok_or_else(|| SheetError::VendorUndetected {
        sheet: sheet.name.clone(),
    })?;
    log::info!("Sheet '{}': vendor identified as '{}'", sheet.name, vendor_name);

    let system_filtered = filter_system_rows(system, &vendor_name);

    let recon = reconcile_rows(
        sheet,
        &system_filtered,
        &outcome.mapping,
        &vendor_key,
        &system_key,
        policy,
        &vendor_name,
    );

    Ok(SheetReport {
        sheet_name: sheet.name.clone(),
        vendor_name,
        outcome,
        vendor_key,
        system_key,
        recon,
    })
}

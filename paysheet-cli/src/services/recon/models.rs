//! Reconciliation result types

use crate::services::matching::MatchOutcome;
use crate::sheets::CellValue;

/// Which source a record was missing from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Vendor,
    System,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Vendor => write!(f, "Vendor"),
            Side::System => write!(f, "System"),
        }
    }
}

/// One compared field for one matched employee
#[derive(Debug, Clone)]
pub struct FieldDiff {
    pub employee_id: String,
    pub column: String,
    pub vendor_value: CellValue,
    pub system_value: CellValue,
    pub matched: bool,
    /// vendor - system, when both sides parse as numbers
    pub difference: Option<f64>,
}

/// An employee present on only one side of the join
#[derive(Debug, Clone)]
pub struct MissingEmployee {
    pub employee_id: String,
    pub missing_in: Side,
}

/// Headcount summary for one vendor sheet.
///
/// Invariants: `matching + only_in_vendor == vendor_count` and
/// `matching + only_in_system == system_count`.
#[derive(Debug, Clone)]
pub struct Headcount {
    pub vendor: String,
    pub vendor_count: usize,
    pub system_count: usize,
    pub matching: usize,
    pub only_in_vendor: usize,
    pub only_in_system: usize,
}

/// Output of joining and comparing one vendor sheet against the system
#[derive(Debug, Clone)]
pub struct ReconResult {
    pub diffs: Vec<FieldDiff>,
    pub missing: Vec<MissingEmployee>,
    /// Per-column count of non-matching verdicts, in compared-column order
    pub mismatch_counts: Vec<(String, usize)>,
    pub headcount: Headcount,
    /// Matching verdicts / total verdicts; None when nothing was compared
    pub match_rate: Option<f64>,
}

/// Everything produced for one successfully processed vendor sheet
#[derive(Debug, Clone)]
pub struct SheetReport {
    pub sheet_name: String,
    pub vendor_name: String,
    pub outcome: MatchOutcome,
    pub vendor_key: String,
    pub system_key: String,
    pub recon: ReconResult,
}

//! Report assembly
//!
//! Formats reconciliation results into styled Excel workbooks and an
//! optional CSV. Peripheral to the reconciliation core: consumes
//! `MatchOutcome` and `SheetReport` values and owns nothing else.

pub mod csv_exporter;
mod formatting;
pub mod sheets;

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::services::matching::MatchOutcome;
use crate::services::recon::SheetReport;
use sheets::*;

/// Excel report writer
pub struct ReportWriter;

impl ReportWriter {
    /// Write the header-mapping workbook: one color-coded worksheet per
    /// vendor sheet
    pub fn write_header_mapping(outcomes: &[(String, MatchOutcome)], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();

        for (sheet_name, outcome) in outcomes {
            create_header_mapping_sheet(&mut workbook, sheet_name, outcome)?;
        }

        workbook
            .save(path)
            .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

        log::info!("Header mapping exported to: {}", path.display());
        Ok(())
    }

    /// Write the row-comparison workbook: Row Differences, Missing
    /// Employees, Summary and Headcount tabs across all processed
    /// vendor sheets
    pub fn write_row_comparison(
        reports: &[SheetReport],
        path: &Path,
        only_mismatches: bool,
    ) -> Result<()> {
        let mut workbook = Workbook::new();

        create_row_differences_sheet(&mut workbook, reports, only_mismatches)?;
        create_missing_employees_sheet(&mut workbook, reports)?;
        create_summary_sheet(&mut workbook, reports)?;
        create_headcount_sheet(&mut workbook, reports)?;

        workbook
            .save(path)
            .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

        log::info!("Row comparison exported to: {}", path.display());
        Ok(())
    }
}

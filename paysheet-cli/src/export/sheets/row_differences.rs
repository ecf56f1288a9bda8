//! Row Differences, Missing Employees and Summary sheets

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use crate::services::recon::SheetReport;

use super::{finish_sheet, write_cell, write_headers};

/// Per-field comparison rows across all processed vendor sheets
pub fn create_row_differences_sheet(
    workbook: &mut Workbook,
    reports: &[SheetReport],
    only_mismatches: bool,
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Row Differences")?;

    write_headers(
        sheet,
        &[
            "Vendor",
            "Employee ID",
            "Column",
            "Vendor Value",
            "System Value",
            "Difference",
            "Match?",
        ],
    )?;

    let mut row = 1u32;
    for report in reports {
        for diff in &report.recon.diffs {
            if only_mismatches && diff.matched {
                continue;
            }
            sheet.write_string(row, 0, &report.vendor_name)?;
            sheet.write_string(row, 1, &diff.employee_id)?;
            sheet.write_string(row, 2, &diff.column)?;
            write_cell(sheet, row, 3, &diff.vendor_value)?;
            write_cell(sheet, row, 4, &diff.system_value)?;
            if let Some(difference) = diff.difference {
                sheet.write_number(row, 5, difference)?;
            }
            sheet.write_string(row, 6, if diff.matched { "Yes" } else { "No" })?;
            row += 1;
        }
    }

    finish_sheet(sheet, row.saturating_sub(1).max(1), 7)?;
    Ok(())
}

/// Employees present on only one side of the join
pub fn create_missing_employees_sheet(
    workbook: &mut Workbook,
    reports: &[SheetReport],
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Missing Employees")?;

    write_headers(sheet, &["Vendor", "Employee ID", "Missing In"])?;

    let mut row = 1u32;
    for report in reports {
        for missing in &report.recon.missing {
            sheet.write_string(row, 0, &report.vendor_name)?;
            sheet.write_string(row, 1, &missing.employee_id)?;
            sheet.write_string(row, 2, missing.missing_in.to_string())?;
            row += 1;
        }
    }

    finish_sheet(sheet, row.saturating_sub(1).max(1), 3)?;
    Ok(())
}

/// Per-column mismatch counts
pub fn create_summary_sheet(workbook: &mut Workbook, reports: &[SheetReport]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;

    write_headers(sheet, &["Vendor", "Column", "Mismatch Count"])?;

    let mut row = 1u32;
    for report in reports {
        for (column, count) in &report.recon.mismatch_counts {
            sheet.write_string(row, 0, &report.vendor_name)?;
            sheet.write_string(row, 1, column)?;
            sheet.write_number(row, 2, *count as f64)?;
            row += 1;
        }
    }

    finish_sheet(sheet, row.saturating_sub(1).max(1), 3)?;
    Ok(())
}

//! Worksheet builders for the report workbooks

mod header_mapping;
mod headcount;
mod row_differences;

pub use header_mapping::create_header_mapping_sheet;
pub use headcount::create_headcount_sheet;
pub use row_differences::{
    create_missing_employees_sheet, create_row_differences_sheet, create_summary_sheet,
};

use anyhow::Result;
use rust_xlsxwriter::Worksheet;

use crate::sheets::CellValue;

/// Write a typed cell value, leaving nulls empty
pub(crate) fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> Result<()> {
    match value {
        CellValue::Null => {}
        CellValue::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
        CellValue::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        CellValue::Bool(b) => {
            sheet.write_string(row, col, b.to_string())?;
        }
        CellValue::DateTime(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

/// Write the styled header row
pub(crate) fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = super::formatting::create_header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

/// Freeze the header row, add an autofilter over the data and fit the
/// column widths
pub(crate) fn finish_sheet(sheet: &mut Worksheet, rows: u32, cols: u16) -> Result<()> {
    sheet.set_freeze_panes(1, 0)?;
    sheet.autofilter(0, 0, rows, cols.saturating_sub(1))?;
    sheet.autofit();
    Ok(())
}

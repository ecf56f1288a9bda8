//! Header Mapping sheet - one per vendor sheet, color-coded by match type

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use crate::export::formatting::{create_system_only_format, match_kind_format};
use crate::services::matching::MatchOutcome;

use super::{finish_sheet, write_headers};

/// Add a worksheet showing the column mapping for one vendor sheet.
///
/// Mapped and unmatched vendor headers come first in vendor column
/// order, followed by the system-only headers. The Match Type column is
/// color-coded per kind.
pub fn create_header_mapping_sheet(
    workbook: &mut Workbook,
    sheet_name: &str,
    outcome: &MatchOutcome,
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    write_headers(sheet, &["Vendor Header", "System Header", "Match Type"])?;

    let mut row = 1u32;
    for entry in outcome.mapping.entries() {
        sheet.write_string(row, 0, &entry.vendor)?;
        if let Some(system) = &entry.system {
            sheet.write_string(row, 1, system)?;
        }
        sheet.write_string_with_format(row, 2, entry.kind.label(), &match_kind_format(&entry.kind))?;
        row += 1;
    }

    let system_only_format = create_system_only_format();
    for header in &outcome.system_only {
        sheet.write_string(row, 1, header)?;
        sheet.write_string_with_format(row, 2, "System Only", &system_only_format)?;
        row += 1;
    }

    finish_sheet(sheet, row.saturating_sub(1).max(1), 3)?;
    Ok(())
}

//! Headcount sheet - one row per processed vendor sheet

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use crate::services::recon::SheetReport;

use super::{finish_sheet, write_headers};

/// Title-case a normalized vendor identity for display
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn create_headcount_sheet(workbook: &mut Workbook, reports: &[SheetReport]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Headcount")?;

    write_headers(
        sheet,
        &[
            "Vendor",
            "Vendor Count",
            "System Count",
            "Matching",
            "Only in Vendor",
            "Only in System",
        ],
    )?;

    for (i, report) in reports.iter().enumerate() {
        let row = (i + 1) as u32;
        let h = &report.recon.headcount;
        sheet.write_string(row, 0, title_case(&h.vendor))?;
        sheet.write_number(row, 1, h.vendor_count as f64)?;
        sheet.write_number(row, 2, h.system_count as f64)?;
        sheet.write_number(row, 3, h.matching as f64)?;
        sheet.write_number(row, 4, h.only_in_vendor as f64)?;
        sheet.write_number(row, 5, h.only_in_system as f64)?;
    }

    finish_sheet(sheet, reports.len().max(1) as u32, 6)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("acmeco"), "Acmeco");
        assert_eq!(title_case("blue tree"), "Blue Tree");
        assert_eq!(title_case(""), "");
    }
}

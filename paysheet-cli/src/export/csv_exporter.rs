//! CSV export of the row differences

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::services::recon::SheetReport;

/// Export the per-field comparison rows to a CSV file, mirroring the
/// Row Differences worksheet
pub fn export_row_differences_csv(
    reports: &[SheetReport],
    path: &Path,
    only_mismatches: bool,
) -> Result<()> {
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    wtr.write_record([
        "Vendor",
        "Employee ID",
        "Column",
        "Vendor Value",
        "System Value",
        "Difference",
        "Match?",
    ])
    .context("Failed to write CSV header")?;

    for report in reports {
        for diff in &report.recon.diffs {
            if only_mismatches && diff.matched {
                continue;
            }
            let vendor_value = diff.vendor_value.to_display();
            let system_value = diff.system_value.to_display();
            let difference = diff.difference.map(|d| d.to_string()).unwrap_or_default();
            wtr.write_record([
                report.vendor_name.as_str(),
                diff.employee_id.as_str(),
                diff.column.as_str(),
                vendor_value.as_str(),
                system_value.as_str(),
                difference.as_str(),
                if diff.matched { "Yes" } else { "No" },
            ])
            .with_context(|| format!("Failed to write row for employee {}", diff.employee_id))?;
        }
    }

    wtr.flush().context("Failed to flush CSV writer")?;

    log::info!("CSV file exported to: {}", path.display());
    Ok(())
}

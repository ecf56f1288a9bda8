//! Header row detection for messy spreadsheets
//!
//! Payroll exports often carry a title row above a sparse-then-dense
//! header row, so the first sufficiently dense row wins over the densest
//! row overall.

use super::values::CellValue;

/// Locate the header row within the first `max_scan` rows of a sheet.
///
/// Returns the index of the first row whose fraction of non-empty cells
/// exceeds 0.5. If no row qualifies, falls back to the scanned row with
/// the most non-empty cells (earliest wins on ties), and finally to 0.
/// Never fails.
pub fn detect_header_row(rows: &[Vec<CellValue>], max_scan: usize) -> usize {
    let scanned = rows.len().min(max_scan);

    for (i, row) in rows.iter().take(scanned).enumerate() {
        if row.is_empty() {
            continue;
        }
        let non_empty = row.iter().filter(|c| !c.is_null()).count();
        if non_empty as f64 / row.len() as f64 > 0.5 {
            return i;
        }
    }

    // No row cleared the density threshold: take the fullest scanned row
    let mut best_row = 0;
    let mut best_count = 0;
    for (i, row) in rows.iter().take(scanned).enumerate() {
        let non_empty = row.iter().filter(|c| !c.is_null()).count();
        if non_empty > best_count {
            best_count = non_empty;
            best_row = i;
        }
    }

    best_row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    CellValue::Null
                } else {
                    CellValue::Text(c.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_first_dense_row_wins() {
        let rows = vec![
            row(&["Payroll Report", "", "", ""]),
            row(&["", "", "", ""]),
            row(&["Employee ID", "Name", "Gross", ""]),
            row(&["E1", "Alice", "1000", "extra"]),
        ];
        assert_eq!(detect_header_row(&rows, 10), 2);
    }

    #[test]
    fn test_threshold_takes_priority_over_global_max() {
        // Row 1 clears the threshold first even though row 3 is denser
        let rows = vec![
            row(&["title", "", "", ""]),
            row(&["a", "b", "c", ""]),
            row(&["", "", "", ""]),
            row(&["a", "b", "c", "d"]),
        ];
        assert_eq!(detect_header_row(&rows, 10), 1);
    }

    #[test]
    fn test_all_sparse_falls_back_to_densest_row() {
        let rows = vec![
            row(&["x", "", "", "", "", ""]),
            row(&["x", "y", "", "", "", ""]),
            row(&["x", "", "", "", "", ""]),
        ];
        assert_eq!(detect_header_row(&rows, 10), 1);
    }

    #[test]
    fn test_densest_tie_keeps_earliest_row() {
        let rows = vec![
            row(&["x", "y", "", "", "", ""]),
            row(&["a", "b", "", "", "", ""]),
        ];
        assert_eq!(detect_header_row(&rows, 10), 0);
    }

    #[test]
    fn test_empty_grid_returns_zero() {
        assert_eq!(detect_header_row(&[], 10), 0);
        let rows = vec![row(&["", "", ""]), row(&["", "", ""])];
        assert_eq!(detect_header_row(&rows, 10), 0);
    }

    #[test]
    fn test_rows_beyond_scan_window_are_ignored() {
        let mut rows = vec![row(&["x", "", "", "", "", ""])];
        rows.extend(std::iter::repeat(row(&["", "", "", "", "", ""])).take(9));
        rows.push(row(&["a", "b", "c", "d", "e", "f"]));
        assert_eq!(detect_header_row(&rows, 10), 0);
    }
}

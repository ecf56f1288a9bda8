//! Load workbook sheets into in-memory tables

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use calamine::{Reader, Xlsx, open_workbook};

use super::header::detect_header_row;
use super::values::{CellValue, cell_to_value, normalize_text};

/// One sheet of a workbook, with the header row resolved and column
/// names normalized. Read-only after loading.
#[derive(Debug, Clone)]
pub struct SheetTable {
    /// Sheet (tab) name
    pub name: String,
    /// Normalized column names, in sheet order
    pub headers: Vec<String>,
    /// Data rows below the header row
    pub rows: Vec<Vec<CellValue>>,
    /// Header -> column index (first occurrence)
    index: HashMap<String, usize>,
}

impl SheetTable {
    /// Build a table from raw headers and rows, normalizing the headers
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_text(h)).collect();
        let mut index = HashMap::new();
        for (i, h) in headers.iter().enumerate() {
            if !h.is_empty() {
                index.entry(h.clone()).or_insert(i);
            }
        }
        Self {
            name: name.into(),
            headers,
            rows,
            index,
        }
    }

    /// Column index of a normalized header name
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.index.get(header).copied()
    }

    /// Value of `header` in `row`, null when the column or cell is absent
    pub fn value(&self, row: &[CellValue], header: &str) -> CellValue {
        self.column_index(header)
            .and_then(|i| row.get(i))
            .cloned()
            .unwrap_or(CellValue::Null)
    }

    /// Copy of this table keeping only rows the predicate accepts
    pub fn filtered(&self, mut keep: impl FnMut(&[CellValue]) -> bool) -> SheetTable {
        SheetTable {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| keep(r.as_slice()))
                .cloned()
                .collect(),
            index: self.index.clone(),
        }
    }
}

/// An opened workbook file. The handle is scoped to the loading step;
/// callers drop it once every needed sheet is in memory.
pub struct WorkbookSource {
    workbook: Xlsx<BufReader<File>>,
    path: PathBuf,
}

impl WorkbookSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let workbook: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
        Ok(Self {
            workbook,
            path: path.to_path_buf(),
        })
    }

    /// Names of all sheets, in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Load one sheet, detecting its header row within the first
    /// `max_scan` rows
    pub fn load_sheet(&mut self, sheet_name: &str, max_scan: usize) -> Result<SheetTable> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .with_context(|| {
                format!(
                    "Failed to read sheet '{}' from {}",
                    sheet_name,
                    self.path.display()
                )
            })?;

        let grid: Vec<Vec<CellValue>> = range
            .rows()
            .map(|r| r.iter().map(cell_to_value).collect())
            .collect();

        if grid.is_empty() {
            bail!(
                "Sheet '{}' in {} is empty",
                sheet_name,
                self.path.display()
            );
        }

        let header_row = detect_header_row(&grid, max_scan);
        log::debug!(
            "Sheet '{}': header row detected at index {}",
            sheet_name,
            header_row
        );

        let headers: Vec<String> = grid[header_row]
            .iter()
            .map(|c| c.to_display())
            .collect();
        let rows = grid[header_row + 1..].to_vec();

        Ok(SheetTable::new(sheet_name, headers, rows))
    }

    /// Load the first sheet of the workbook (the system-of-record shape)
    pub fn load_first_sheet(&mut self, max_scan: usize) -> Result<SheetTable> {
        let names = self.sheet_names();
        let first = names
            .first()
            .with_context(|| format!("Workbook {} has no sheets", self.path.display()))?;
        self.load_sheet(first, max_scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_normalizes_headers_and_indexes_first_occurrence() {
        let table = SheetTable::new(
            "Sheet1",
            vec!["  Employee ID ".into(), "Name".into(), "employee  id".into()],
            vec![vec![
                CellValue::Text("E1".into()),
                CellValue::Text("Alice".into()),
                CellValue::Text("dup".into()),
            ]],
        );
        assert_eq!(table.headers, vec!["employee id", "name", "employee id"]);
        assert_eq!(table.column_index("employee id"), Some(0));
        assert_eq!(
            table.value(&table.rows[0], "employee id"),
            CellValue::Text("E1".into())
        );
        assert_eq!(table.value(&table.rows[0], "missing"), CellValue::Null);
    }

    #[test]
    fn test_filtered_keeps_headers() {
        let table = SheetTable::new(
            "Sheet1",
            vec!["id".into()],
            vec![
                vec![CellValue::Int(1)],
                vec![CellValue::Int(2)],
                vec![CellValue::Int(3)],
            ],
        );
        let kept = table.filtered(|row| row[0] != CellValue::Int(2));
        assert_eq!(kept.rows.len(), 2);
        assert_eq!(kept.column_index("id"), Some(0));
    }
}

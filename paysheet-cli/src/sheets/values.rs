//! Cell value model and normalization helpers

use calamine::Data;

/// A typed cell value read from a workbook
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Null,
    /// Text cell
    Text(String),
    /// Whole number (integers, and floats with no fractional part)
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean cell
    Bool(bool),
    /// Date/time cell, carried as its string form
    DateTime(String),
}

impl CellValue {
    /// Check if this value is empty
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Display form of the value; empty string for null
    pub fn to_display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(s) => s.clone(),
        }
    }

    /// Try to interpret the value as a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// String form used for joining records by key.
    ///
    /// Numeric values collapse to their integer representation when they
    /// have no fractional part, so `1001`, `1001.0` and `"1001"` all key
    /// to `"1001"` regardless of which side they came from.
    pub fn key_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                        (f as i64).to_string()
                    }
                    _ => trimmed.to_string(),
                }
            }
            other => other.to_display(),
        }
    }
}

/// Convert a calamine cell to a `CellValue`
pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => {
            // If it's a whole number, use integer
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(format!("{}", dt)),
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::DateTime(s.clone()),
        Data::Error(_) => CellValue::Null,
    }
}

/// Normalize text for identity comparisons: trimmed, lowercased, with
/// internal whitespace collapsed to single spaces.
///
/// Column names and vendor identities are equal iff their normalized
/// forms are equal.
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

//! Field comparison strategies
//!
//! Two observed policies exist and disagree, so both are first-class:
//! strict decimal-truncated string equality, and tolerant numeric
//! comparison with a special-cased name column. The tolerance and the
//! name column are configuration, not constants.

use crate::sheets::{CellValue, normalize_text};

/// Named comparison strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Decimal-truncated string equality
    Strict,
    /// Numeric tolerance, with name-normalized equality for the name column
    Tolerant,
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMode::Strict => write!(f, "strict"),
            ComparisonMode::Tolerant => write!(f, "tolerant"),
        }
    }
}

/// Field equality policy applied during row reconciliation
#[derive(Debug, Clone)]
pub struct ComparePolicy {
    pub mode: ComparisonMode,
    /// Maximum absolute numeric difference tolerated in tolerant mode
    pub tolerance: f64,
    /// Column compared with name normalization in tolerant mode
    pub name_column: String,
}

impl Default for ComparePolicy {
    fn default() -> Self {
        Self {
            mode: ComparisonMode::Tolerant,
            tolerance: 2.0,
            name_column: "employee name".to_string(),
        }
    }
}

impl ComparePolicy {
    /// Verdict for one vendor/system value pair in `column`
    pub fn values_match(&self, column: &str, vendor: &CellValue, system: &CellValue) -> bool {
        match self.mode {
            ComparisonMode::Strict => {
                if vendor.is_null() && system.is_null() {
                    return true;
                }
                if vendor.is_null() || system.is_null() {
                    return false;
                }
                strict_form(vendor) == strict_form(system)
            }
            ComparisonMode::Tolerant => {
                if normalize_text(column) == normalize_text(&self.name_column) {
                    return normalize_text(&vendor.to_display())
                        == normalize_text(&system.to_display());
                }
                match (vendor.as_f64(), system.as_f64()) {
                    (Some(v), Some(s)) => (v - s).abs() <= self.tolerance,
                    _ => false,
                }
            }
        }
    }
}

/// Strict-mode normal form: numeric values compare by their truncated
/// integer representation ("100.0" and "100.4" both become "100"),
/// everything else by its trimmed text.
pub fn strict_form(value: &CellValue) -> String {
    let display = value.to_display();
    let trimmed = display.trim();
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            (f.trunc() as i64).to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// vendor - system, when both sides parse as numbers
pub fn numeric_diff(vendor: &CellValue, system: &CellValue) -> Option<f64> {
    match (vendor.as_f64(), system.as_f64()) {
        (Some(v), Some(s)) => Some(v - s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn strict() -> ComparePolicy {
        ComparePolicy {
            mode: ComparisonMode::Strict,
            ..ComparePolicy::default()
        }
    }

    #[test]
    fn test_strict_decimal_suffix_matches() {
        let policy = strict();
        assert!(policy.values_match("gross", &text("100.0"), &text("100")));
        assert!(policy.values_match("gross", &CellValue::Int(100), &text("100")));
    }

    #[test]
    fn test_strict_truncation_rule() {
        let policy = strict();
        assert!(policy.values_match("gross", &text("100.4"), &text("100")));
        assert!(!policy.values_match("gross", &text("100"), &text("101")));
    }

    #[test]
    fn test_strict_text_is_exact() {
        let policy = strict();
        assert!(policy.values_match("name", &text(" Alice"), &text("Alice ")));
        assert!(!policy.values_match("name", &text("Alice"), &text("alice")));
    }

    #[test]
    fn test_strict_null_handling() {
        let policy = strict();
        assert!(policy.values_match("gross", &CellValue::Null, &CellValue::Null));
        assert!(!policy.values_match("gross", &CellValue::Null, &text("100")));
    }

    #[test]
    fn test_tolerant_numeric_tolerance() {
        let policy = ComparePolicy::default();
        assert!(policy.values_match("gross", &CellValue::Int(100), &CellValue::Int(102)));
        assert!(!policy.values_match("gross", &CellValue::Int(100), &CellValue::Int(103)));
        assert!(policy.values_match("gross", &text("1000"), &CellValue::Int(1002)));
    }

    #[test]
    fn test_tolerant_name_column_normalizes() {
        let policy = ComparePolicy::default();
        assert!(policy.values_match(
            "employee name",
            &text("John Smith"),
            &text("john   smith")
        ));
        assert!(!policy.values_match("employee name", &text("John Smith"), &text("Jane Smith")));
    }

    #[test]
    fn test_tolerant_unparseable_is_no_match() {
        let policy = ComparePolicy::default();
        assert!(!policy.values_match("gross", &text("n/a"), &CellValue::Int(100)));
        assert!(!policy.values_match("gross", &CellValue::Null, &CellValue::Int(100)));
    }

    #[test]
    fn test_custom_tolerance_and_name_column() {
        let policy = ComparePolicy {
            mode: ComparisonMode::Tolerant,
            tolerance: 0.5,
            name_column: "full name".to_string(),
        };
        assert!(!policy.values_match("gross", &CellValue::Int(100), &CellValue::Int(101)));
        assert!(policy.values_match("full name", &text("A B"), &text("a  b")));
        // "employee name" is just numbers now
        assert!(!policy.values_match("employee name", &text("John"), &text("john")));
    }

    #[test]
    fn test_numeric_diff() {
        assert_eq!(
            numeric_diff(&CellValue::Int(1000), &CellValue::Int(1002)),
            Some(-2.0)
        );
        assert_eq!(numeric_diff(&text("abc"), &CellValue::Int(1)), None);
        assert_eq!(numeric_diff(&CellValue::Null, &CellValue::Int(1)), None);
    }
}

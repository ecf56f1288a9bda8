//! Employee key resolution
//!
//! The join key is found by name-pattern heuristics over the mapped
//! vendor columns. When several candidates exist the decision is
//! delegated to an injected selector so interactive callers can prompt
//! while batch callers stay deterministic.

use crate::services::matching::ColumnMapping;

/// Substrings (space-stripped, lowercased) marking an employee
/// identifier column
const KEY_COLUMN_PATTERNS: [&str; 6] = [
    "employeeid",
    "employeeno",
    "employeenumber",
    "bluetreeid",
    "cemsemployeeid",
    "empid",
];

/// Chooses among multiple key-column candidates; receives the vendor
/// column names and returns the index of the chosen one.
pub type KeyColumnSelector<'a> = dyn Fn(&[String]) -> usize + 'a;

/// Selector used by non-interactive callers: the first candidate in
/// mapping-iteration order.
pub fn first_candidate(_candidates: &[String]) -> usize {
    0
}

/// Mapped (vendor, system) column pairs eligible as the employee key,
/// in mapping order
pub fn key_candidates(mapping: &ColumnMapping) -> Vec<(String, String)> {
    mapping
        .mapped_pairs()
        .filter(|(vendor, _)| {
            let stripped: String = vendor.chars().filter(|c| !c.is_whitespace()).collect();
            KEY_COLUMN_PATTERNS.iter().any(|p| stripped.contains(p))
        })
        .map(|(v, s)| (v.to_string(), s.to_string()))
        .collect()
}

/// Resolve the (vendor, system) employee key column pair.
///
/// `None` when no candidate exists; the caller reports the sheet as
/// skipped. With multiple candidates the selector decides.
pub fn resolve_key_columns(
    mapping: &ColumnMapping,
    selector: &KeyColumnSelector<'_>,
) -> Option<(String, String)> {
    let candidates = key_candidates(mapping);
    match candidates.len() {
        0 => None,
        1 => candidates.into_iter().next(),
        _ => {
            let names: Vec<String> = candidates.iter().map(|(v, _)| v.clone()).collect();
            let choice = selector(&names).min(candidates.len() - 1);
            log::debug!("Employee key disambiguated to '{}'", candidates[choice].0);
            candidates.into_iter().nth(choice)
        }
    }
}

//! Exact-phase matching and mapping assembly

use std::collections::{HashMap, HashSet};

use crate::sheets::normalize_text;

use super::models::{ColumnMapping, ColumnMatch, MatchKind, MatchOutcome};

/// Result of the exact phase: matched pairs plus both remainders, all
/// normalized and deduplicated, in input order.
#[derive(Debug, Clone)]
pub struct ExactPhase {
    pub matched: HashSet<String>,
    pub vendor_headers: Vec<String>,
    pub unmatched_vendor: Vec<String>,
    pub unmatched_system: Vec<String>,
}

/// Phase 1: pair vendor and system headers whose normalized forms are
/// byte-equal. Matched system headers leave the candidate pool, so one
/// system header cannot satisfy two distinct vendor headers here.
pub fn exact_phase(vendor_headers: &[String], system_headers: &[String]) -> ExactPhase {
    let system_set: HashSet<String> = system_headers
        .iter()
        .map(|h| normalize_text(h))
        .filter(|h| !h.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let mut normalized_vendor = Vec::new();
    let mut matched = HashSet::new();
    let mut unmatched_vendor = Vec::new();

    for header in vendor_headers {
        let h = normalize_text(header);
        if h.is_empty() || !seen.insert(h.clone()) {
            continue;
        }
        if system_set.contains(&h) {
            matched.insert(h.clone());
        } else {
            unmatched_vendor.push(h.clone());
        }
        normalized_vendor.push(h);
    }

    let mut seen_system = HashSet::new();
    let unmatched_system: Vec<String> = system_headers
        .iter()
        .map(|h| normalize_text(h))
        .filter(|h| !h.is_empty() && seen_system.insert(h.clone()) && !matched.contains(h))
        .collect();

    ExactPhase {
        matched,
        vendor_headers: normalized_vendor,
        unmatched_vendor,
        unmatched_system,
    }
}

/// Merge exact matches with the oracle's proposals into the final
/// mapping. Exact wins for any key present in both; proposals for
/// headers that were never part of the request are dropped.
pub fn assemble_outcome(
    phase: &ExactPhase,
    proposals: &HashMap<String, Option<String>>,
) -> MatchOutcome {
    let mut mapping = ColumnMapping::default();

    for vendor in &phase.vendor_headers {
        if phase.matched.contains(vendor) {
            mapping.push(ColumnMatch {
                vendor: vendor.clone(),
                system: Some(vendor.clone()),
                kind: MatchKind::Exact,
            });
        } else if let Some(Some(system)) = proposals.get(vendor) {
            mapping.push(ColumnMatch {
                vendor: vendor.clone(),
                system: Some(system.clone()),
                kind: MatchKind::Semantic,
            });
        } else {
            mapping.push(ColumnMatch {
                vendor: vendor.clone(),
                system: None,
                kind: MatchKind::Unmatched,
            });
        }
    }

    let consumed: HashSet<&str> = mapping
        .entries()
        .iter()
        .filter(|e| e.kind == MatchKind::Semantic)
        .filter_map(|e| e.system.as_deref())
        .collect();

    let system_only = phase
        .unmatched_system
        .iter()
        .filter(|h| !consumed.contains(h.as_str()))
        .cloned()
        .collect();

    MatchOutcome {
        mapping,
        system_only,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_order_and_case_independent() {
        let phase = exact_phase(
            &headers(&["Employee ID", "Name"]),
            &headers(&["name", "employee id"]),
        );
        assert!(phase.matched.contains("employee id"));
        assert!(phase.matched.contains("name"));
        assert!(phase.unmatched_vendor.is_empty());
        assert!(phase.unmatched_system.is_empty());
    }

    #[test]
    fn test_unmatched_remainders_keep_input_order() {
        let phase = exact_phase(
            &headers(&["Employee ID", "Gross Salary", "Vendor"]),
            &headers(&["employee number", "fixed gross", "contractor"]),
        );
        assert_eq!(
            phase.unmatched_vendor,
            headers(&["employee id", "gross salary", "vendor"])
        );
        assert_eq!(
            phase.unmatched_system,
            headers(&["employee number", "fixed gross", "contractor"])
        );
    }

    #[test]
    fn test_duplicate_vendor_headers_collapse() {
        let phase = exact_phase(
            &headers(&["Name", "name", " NAME "]),
            &headers(&["name"]),
        );
        assert_eq!(phase.vendor_headers, headers(&["name"]));
        assert_eq!(phase.matched.len(), 1);
    }

    #[test]
    fn test_assemble_exact_wins_over_proposal() {
        let phase = exact_phase(&headers(&["Name"]), &headers(&["name", "full name"]));
        let mut proposals = HashMap::new();
        proposals.insert("name".to_string(), Some("full name".to_string()));

        let outcome = assemble_outcome(&phase, &proposals);
        assert_eq!(outcome.mapping.get("name"), Some("name"));
        assert_eq!(outcome.mapping.entries()[0].kind, MatchKind::Exact);
        assert_eq!(outcome.system_only, headers(&["full name"]));
    }

    #[test]
    fn test_assemble_drops_alien_proposal_keys() {
        let phase = exact_phase(&headers(&["Bonus"]), &headers(&["incentive"]));
        let mut proposals = HashMap::new();
        proposals.insert("bonus".to_string(), Some("incentive".to_string()));
        proposals.insert("phantom".to_string(), Some("incentive".to_string()));

        let outcome = assemble_outcome(&phase, &proposals);
        assert_eq!(outcome.mapping.len(), 1);
        assert_eq!(outcome.mapping.get("bonus"), Some("incentive"));
        assert!(outcome.system_only.is_empty());
    }

    #[test]
    fn test_assemble_none_proposal_stays_unmatched() {
        let phase = exact_phase(&headers(&["Bonus"]), &headers(&["incentive"]));
        let mut proposals = HashMap::new();
        proposals.insert("bonus".to_string(), None);

        let outcome = assemble_outcome(&phase, &proposals);
        assert_eq!(outcome.mapping.get("bonus"), None);
        assert_eq!(outcome.mapping.entries()[0].kind, MatchKind::Unmatched);
        assert_eq!(outcome.system_only, headers(&["incentive"]));
    }
}

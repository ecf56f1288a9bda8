//! Column mapping types

/// How a vendor column was paired with a system column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// Normalized names are byte-equal
    Exact,
    /// Pairing proposed by the semantic oracle
    Semantic,
    /// No pairing found
    Unmatched,
}

impl MatchKind {
    /// Display label for reports
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Exact => "Exact Match",
            MatchKind::Semantic => "Semantic Match",
            MatchKind::Unmatched => "Not Matched",
        }
    }
}

/// One vendor column and its resolved system counterpart, if any
#[derive(Debug, Clone)]
pub struct ColumnMatch {
    pub vendor: String,
    pub system: Option<String>,
    pub kind: MatchKind,
}

/// Ordered vendor -> system column mapping.
///
/// Entries follow the vendor sheet's column order; each vendor header
/// appears at most once. Exact matches always beat semantic proposals
/// for the same key.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    entries: Vec<ColumnMatch>,
}

impl ColumnMapping {
    /// Append an entry unless the vendor header is already present
    pub fn push(&mut self, entry: ColumnMatch) {
        if !self.entries.iter().any(|e| e.vendor == entry.vendor) {
            self.entries.push(entry);
        }
    }

    /// All entries, in vendor column order
    pub fn entries(&self) -> &[ColumnMatch] {
        &self.entries
    }

    /// System column mapped to a vendor header, if any
    pub fn get(&self, vendor: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.vendor == vendor)
            .and_then(|e| e.system.as_deref())
    }

    /// (vendor, system) pairs for entries that resolved to a system column
    pub fn mapped_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|e| e.system.as_deref().map(|s| (e.vendor.as_str(), s)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Full result of matching one vendor sheet's headers against the
/// system sheet's headers
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub mapping: ColumnMapping,
    /// System headers left without a vendor counterpart
    pub system_only: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_vendor_headers_keep_first_entry() {
        let mut mapping = ColumnMapping::default();
        mapping.push(ColumnMatch {
            vendor: "employee id".into(),
            system: Some("employee number".into()),
            kind: MatchKind::Semantic,
        });
        mapping.push(ColumnMatch {
            vendor: "employee id".into(),
            system: None,
            kind: MatchKind::Unmatched,
        });
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("employee id"), Some("employee number"));
    }

    #[test]
    fn test_mapped_pairs_skip_unmatched() {
        let mut mapping = ColumnMapping::default();
        mapping.push(ColumnMatch {
            vendor: "name".into(),
            system: Some("name".into()),
            kind: MatchKind::Exact,
        });
        mapping.push(ColumnMatch {
            vendor: "bonus".into(),
            system: None,
            kind: MatchKind::Unmatched,
        });
        let pairs: Vec<_> = mapping.mapped_pairs().collect();
        assert_eq!(pairs, vec![("name", "name")]);
    }
}

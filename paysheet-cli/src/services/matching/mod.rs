//! Column matching between vendor and system sheets
//!
//! Two phases: exact normalized-name equality first, then a semantic
//! pass over the remainders through the external oracle. Pure logic is
//! decoupled from the oracle transport and reusable across callers.

pub mod core;
pub mod models;
pub mod oracle;

pub use models::{ColumnMapping, ColumnMatch, MatchKind, MatchOutcome};
pub use oracle::{AzureOracle, OracleConfig, OracleError, SemanticOracle};

use std::collections::HashMap;

/// Compute the vendor -> system column mapping for one vendor sheet.
///
/// The oracle is only consulted when both sides still have unmatched
/// headers after the exact phase. An unparseable oracle response fails
/// the whole mapping step for this sheet; there is no retry.
pub async fn match_columns(
    vendor_headers: &[String],
    system_headers: &[String],
    oracle: &dyn SemanticOracle,
) -> Result<MatchOutcome, OracleError> {
    let phase = core::exact_phase(vendor_headers, system_headers);

    let proposals: HashMap<String, Option<String>> =
        if !phase.unmatched_vendor.is_empty() && !phase.unmatched_system.is_empty() {
            let raw = oracle
                .propose_mapping(&phase.unmatched_vendor, &phase.unmatched_system)
                .await?;
            oracle::parse_proposals(&raw)?
        } else {
            HashMap::new()
        };

    Ok(core::assemble_outcome(&phase, &proposals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Oracle stub returning a fixed raw response
    struct StubOracle {
        response: String,
    }

    #[async_trait]
    impl SemanticOracle for StubOracle {
        async fn propose_mapping(
            &self,
            _vendor_headers: &[String],
            _system_headers: &[String],
        ) -> Result<String, OracleError> {
            Ok(self.response.clone())
        }
    }

    /// Oracle stub that fails the test when consulted
    struct UnreachableOracle;

    #[async_trait]
    impl SemanticOracle for UnreachableOracle {
        async fn propose_mapping(
            &self,
            _vendor_headers: &[String],
            _system_headers: &[String],
        ) -> Result<String, OracleError> {
            panic!("oracle must not be consulted when the exact phase resolves everything");
        }
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_exact_only_skips_oracle() {
        let outcome = match_columns(
            &headers(&["Employee ID", "Name"]),
            &headers(&["name", "employee id"]),
            &UnreachableOracle,
        )
        .await
        .unwrap();

        assert_eq!(outcome.mapping.len(), 2);
        assert!(outcome
            .mapping
            .entries()
            .iter()
            .all(|e| e.kind == MatchKind::Exact));
        assert!(outcome.system_only.is_empty());
    }

    #[tokio::test]
    async fn test_semantic_phase_merges_proposals() {
        let oracle = StubOracle {
            response: r#"{"employee id": "employee number", "gross salary": "fixed gross", "vendor": "no match"}"#
                .to_string(),
        };
        let outcome = match_columns(
            &headers(&["Employee ID", "Gross Salary", "Vendor", "Name"]),
            &headers(&["employee number", "fixed gross", "contractor", "name"]),
            &oracle,
        )
        .await
        .unwrap();

        assert_eq!(outcome.mapping.get("employee id"), Some("employee number"));
        assert_eq!(outcome.mapping.get("gross salary"), Some("fixed gross"));
        assert_eq!(outcome.mapping.get("vendor"), None);
        assert_eq!(outcome.mapping.get("name"), Some("name"));
        assert_eq!(outcome.system_only, headers(&["contractor"]));
    }

    #[tokio::test]
    async fn test_malformed_oracle_response_fails_hard() {
        let oracle = StubOracle {
            response: "sorry, I cannot help with that".to_string(),
        };
        let result = match_columns(
            &headers(&["Employee ID"]),
            &headers(&["employee number"]),
            &oracle,
        )
        .await;

        assert!(matches!(result, Err(OracleError::MalformedResponse { .. })));
    }
}

//! Semantic matching oracle
//!
//! The oracle is a pluggable capability: unmatched vendor and system
//! headers go in, a flat vendor -> system|null mapping comes out. The
//! production implementation calls an Azure OpenAI chat deployment; the
//! core logic assumes nothing beyond the contract, so tests substitute
//! a stub returning fixed text.

use std::collections::HashMap;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::sheets::normalize_text;

/// Error talking to or interpreting the semantic oracle
#[derive(Debug)]
pub enum OracleError {
    /// No endpoint/key/deployment configured but the semantic phase was needed
    MissingCredentials,
    /// Transport or HTTP-level failure
    Request(String),
    /// Response was not a vendor -> system mapping, even after extracting
    /// the first balanced object from surrounding prose
    MalformedResponse { raw: String },
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleError::MissingCredentials => {
                write!(
                    f,
                    "semantic matching requires oracle credentials (set AZURE_OPENAI_ENDPOINT, \
                     AZURE_OPENAI_API_KEY and AZURE_OPENAI_DEPLOYMENT or the config file equivalents)"
                )
            }
            OracleError::Request(msg) => write!(f, "oracle request failed: {}", msg),
            OracleError::MalformedResponse { raw } => {
                write!(
                    f,
                    "oracle did not return a parsable header mapping: {:.200}",
                    raw
                )
            }
        }
    }
}

impl std::error::Error for OracleError {}

/// External semantic column matcher.
///
/// Implementations return the oracle's raw text; parsing and validation
/// stay in [`parse_proposals`] so every implementation is held to the
/// same contract.
#[async_trait]
pub trait SemanticOracle: Send + Sync {
    async fn propose_mapping(
        &self,
        vendor_headers: &[String],
        system_headers: &[String],
    ) -> Result<String, OracleError>;
}

/// Build the matching prompt, including the payroll domain hints
pub fn build_prompt(vendor_headers: &[String], system_headers: &[String]) -> String {
    format!(
        "You are a data assistant comparing column headers between two payroll spreadsheets.\n\
         \n\
         These are headers from a vendor paysheet that had no exact match:\n\
         {vendor:?}\n\
         \n\
         And these are the remaining headers from the system paysheet:\n\
         {system:?}\n\
         \n\
         Your task:\n\
         - Match each vendor header to the most semantically similar system header.\n\
         - If no good match exists, set the value to null.\n\
         - Use domain knowledge of payroll systems. For example:\n\
           - \"employee id\" could be \"employee number\", \"cems employee id\", or \"blue tree id\".\n\
           - \"gross salary\" could be \"fixed gross\" or \"ctc\".\n\
         \n\
         Return output as a single JSON object only.",
        vendor = vendor_headers,
        system = system_headers,
    )
}

/// Parse the oracle's raw output into vendor -> system proposals.
///
/// Accepts a flat JSON object of string -> string|null. When the raw
/// text is not directly parsable, the first balanced object-like
/// substring is extracted and reparsed. Values of null or the literal
/// "no match" (any case) become `None`. Anything else is a hard
/// [`OracleError::MalformedResponse`].
pub fn parse_proposals(raw: &str) -> Result<HashMap<String, Option<String>>, OracleError> {
    let object = match serde_json::from_str::<Value>(raw) {
        Ok(v) => v,
        Err(_) => {
            let re = Regex::new(r"(?s)\{.*\}").expect("static regex");
            let candidate = re.find(raw).ok_or_else(|| OracleError::MalformedResponse {
                raw: raw.to_string(),
            })?;
            serde_json::from_str::<Value>(candidate.as_str()).map_err(|_| {
                OracleError::MalformedResponse {
                    raw: raw.to_string(),
                }
            })?
        }
    };

    let map = object.as_object().ok_or_else(|| OracleError::MalformedResponse {
        raw: raw.to_string(),
    })?;

    let mut proposals = HashMap::new();
    for (key, value) in map {
        let proposed = match value {
            Value::Null => None,
            Value::String(s) if normalize_text(s) == "no match" => None,
            Value::String(s) => Some(normalize_text(s)),
            _ => {
                return Err(OracleError::MalformedResponse {
                    raw: raw.to_string(),
                });
            }
        };
        proposals.insert(normalize_text(key), proposed);
    }

    Ok(proposals)
}

/// Azure OpenAI connection settings
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

/// Semantic oracle backed by an Azure OpenAI chat deployment.
///
/// Credentials are checked at call time, so a run whose exact phase
/// matches everything never needs them.
pub struct AzureOracle {
    client: reqwest::Client,
    config: Option<OracleConfig>,
}

impl AzureOracle {
    pub fn new(config: Option<OracleConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SemanticOracle for AzureOracle {
    async fn propose_mapping(
        &self,
        vendor_headers: &[String],
        system_headers: &[String],
    ) -> Result<String, OracleError> {
        let config = self.config.as_ref().ok_or(OracleError::MissingCredentials)?;

        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            config.endpoint.trim_end_matches('/'),
            config.deployment,
            config.api_version,
        );

        let body = serde_json::json!({
            "temperature": 0,
            "messages": [
                { "role": "user", "content": build_prompt(vendor_headers, system_headers) }
            ],
        });

        log::debug!(
            "Submitting {} vendor / {} system headers to oracle",
            vendor_headers.len(),
            system_headers.len()
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", &config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(OracleError::Request(format!(
                "oracle returned {}: {:.200}",
                status, detail
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| OracleError::Request(e.to_string()))?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| OracleError::Request("response carried no message content".to_string()))
    }
}

//! # Governance Policy
//!
//! The fixed constants a deployment of the validator enforces: the required
//! list name, keyword set, list logo, and the chain-ID allow-set. Supplied
//! at construction time so the same pipeline can gate different lists and
//! tests can run against alternate policies.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Governance constants for one deployment of the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPolicy {
    /// The exact value the document's `name` must carry in every version.
    pub list_name: String,
    /// Keywords every version must include (superset check, case-sensitive).
    pub required_keywords: BTreeSet<String>,
    /// The exact value the document's `logoURI` must carry in every version.
    pub list_logo_uri: String,
    /// Chain IDs token records are allowed to reference.
    pub allowed_chain_ids: BTreeSet<u64>,
}

impl ListPolicy {
    /// Whether `chain_id` is in the allow-set.
    pub fn allows_chain(&self, chain_id: u64) -> bool {
        self.allowed_chain_ids.contains(&chain_id)
    }

    /// Required keywords missing from `keywords`, in sorted order.
    /// Empty when the superset condition holds.
    pub fn missing_keywords(&self, keywords: &[String]) -> Vec<String> {
        self.required_keywords
            .iter()
            .filter(|required| !keywords.iter().any(|k| k == *required))
            .cloned()
            .collect()
    }
}

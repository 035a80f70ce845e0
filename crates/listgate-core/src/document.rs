//! # Token-List Document
//!
//! The whole submission: list-level identity fields, a version triple, a
//! timestamp, and the ordered sequence of token records. Documents are
//! immutable value objects — the validator only ever reads two snapshots.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::temporal::Timestamp;
use crate::token::TokenRecord;
use crate::version::ListVersion;

/// Error loading a token-list document from disk or from raw JSON.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read document {path}: {source}")]
    Read {
        /// Path that failed to load.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The content was not valid JSON or did not match the document shape.
    #[error("cannot parse document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A token-list document, either the candidate under review or the
/// previously accepted baseline.
///
/// Token order within `tokens` is not semantically significant; every
/// collection-level check is order-independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenListDocument {
    /// List title; must equal the policy's fixed name in every version.
    pub name: String,
    /// Version triple, strictly increasing across accepted versions.
    pub version: ListVersion,
    /// Free-form tags; must be a superset of the policy's required set.
    pub keywords: Vec<String>,
    /// List-level logo; must equal the policy's fixed URI in every version.
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
    /// When this version of the list was produced.
    pub timestamp: Timestamp,
    /// The listed assets.
    pub tokens: Vec<TokenRecord>,
}

impl TokenListDocument {
    /// Parse a document from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a document from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load and parse a document from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_doc_json() -> serde_json::Value {
        json!({
            "name": "Sandbox Token List",
            "version": {"major": 1, "minor": 0, "patch": 0},
            "keywords": ["sandbox", "tokens"],
            "logoURI": "https://static.sandbox.example/tokenlist.svg",
            "timestamp": "2026-01-15T12:00:00Z",
            "tokens": [{
                "chainId": 89898,
                "address": "0xaa000000000000000000000000000000000000aa",
                "name": "Foo Token",
                "symbol": "FOO",
                "decimals": 18,
                "logoURI": "https://img.example/foo.png"
            }]
        })
    }

    #[test]
    fn test_parse_minimal_document() {
        let doc = TokenListDocument::from_value(minimal_doc_json()).unwrap();
        assert_eq!(doc.name, "Sandbox Token List");
        assert_eq!(doc.version, ListVersion::new(1, 0, 0));
        assert_eq!(doc.tokens.len(), 1);
        assert_eq!(doc.tokens[0].symbol, "FOO");
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let mut bad = minimal_doc_json();
        bad.as_object_mut().unwrap().remove("version");
        let err = TokenListDocument::from_value(bad).unwrap_err();
        assert!(matches!(err, DocumentError::Parse(_)));
    }

    #[test]
    fn test_negative_decimals_is_parse_error() {
        let mut bad = minimal_doc_json();
        bad["tokens"][0]["decimals"] = json!(-1);
        assert!(TokenListDocument::from_value(bad).is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = TokenListDocument::from_path("/nonexistent/list.json").unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_serialize_roundtrip_preserves_wire_names() {
        let doc = TokenListDocument::from_value(minimal_doc_json()).unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("logoURI").is_some());
        assert_eq!(value["timestamp"], "2026-01-15T12:00:00Z");
    }
}

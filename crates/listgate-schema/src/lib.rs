//! # listgate-schema — Token-List Schema Conformance
//!
//! Runtime validation of candidate documents against the token-list JSON
//! Schema (Draft 2020-12). This is the first stage of the pipeline: a
//! document that fails here never reaches the semantic checks.
//!
//! ## Schema Resolution
//!
//! The canonical schema ships embedded in the binary (the copy under
//! `schemas/` at the repository root). Deployments that extend the document
//! shape can point the validator at a schema directory instead; every
//! `*.schema.json` file found there is registered for `$ref` resolution,
//! and resolution never touches the network — unresolved URIs fall back to
//! a permissive schema rather than a fetch.

use std::collections::HashMap;
use std::path::Path;

use jsonschema::{Retrieve, Uri, Validator};
use listgate_core::Violation;
use serde_json::Value;
use thiserror::Error;

/// Filename of the canonical token-list schema.
pub const TOKENLIST_SCHEMA_NAME: &str = "tokenlist.schema.json";

/// The canonical token-list schema, embedded at compile time.
const TOKENLIST_SCHEMA_JSON: &str =
    include_str!("../../../schemas/tokenlist.schema.json");

/// Error building the schema validator. Distinct from [`Violation`]: these
/// are deployment faults (bad schema file), not candidate-document faults.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema file could not be read or parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    Load {
        /// Schema filename or directory.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema itself is invalid and cannot be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    Build {
        /// Schema filename.
        schema_name: String,
        /// Reason compilation failed.
        reason: String,
    },

    /// IO error reading the schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Local retriever that resolves `$ref` URIs against schemas already loaded
/// in memory, so validation never issues a network request.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Try the bare filename for relative $ref spellings.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        // Metaschemas and anything else unknown: accept-all, never fetch.
        Ok(serde_json::json!({}))
    }
}

/// A compiled validator for the token-list document shape.
///
/// Compiled once at construction; `check` can run any number of times and
/// is `Send + Sync`, so one instance can be shared across threads.
#[derive(Debug)]
pub struct TokenListSchema {
    validator: Validator,
}

impl TokenListSchema {
    /// Compile the embedded canonical schema.
    pub fn builtin() -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(TOKENLIST_SCHEMA_JSON).map_err(|e| {
            SchemaError::Load {
                schema_name: TOKENLIST_SCHEMA_NAME.to_string(),
                reason: format!("embedded schema is invalid JSON: {e}"),
            }
        })?;
        Self::compile(value, HashMap::new())
    }

    /// Load `tokenlist.schema.json` from a directory, registering every
    /// sibling `*.schema.json` file for `$ref` resolution.
    pub fn from_dir(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(schema_dir).map_err(|e| SchemaError::Load {
            schema_name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Load {
                schema_name: name.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
            schemas.insert(name.to_string(), value);
        }

        let root = schemas
            .get(TOKENLIST_SCHEMA_NAME)
            .cloned()
            .ok_or_else(|| SchemaError::Load {
                schema_name: TOKENLIST_SCHEMA_NAME.to_string(),
                reason: format!("not found in {}", schema_dir.display()),
            })?;

        Self::compile(root, schemas)
    }

    /// Compile `root`, registering `siblings` (and the root's own `$id`)
    /// for local `$ref` resolution.
    fn compile(root: Value, siblings: HashMap<String, Value>) -> Result<Self, SchemaError> {
        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &siblings {
            if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }
        if let Some(id) = root.get("$id").and_then(|v| v.as_str()) {
            schemas_by_uri.insert(id.to_string(), root.clone());
        }

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });

        let validator = opts.build(&root).map_err(|e| SchemaError::Build {
            schema_name: TOKENLIST_SCHEMA_NAME.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { validator })
    }

    /// Validate a parsed JSON document against the token-list schema.
    ///
    /// Returns one [`Violation::Schema`] per structural error, in the order
    /// the schema engine reports them; empty means the document conforms.
    pub fn check(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation::Schema {
                instance_path: e.instance_path.to_string(),
                detail: e.to_string(),
            })
            .collect()
    }

    /// Convenience predicate for callers that only need a verdict.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

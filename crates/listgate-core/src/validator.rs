//! # Validation Pipeline — Deterministic Governance Checks
//!
//! [`ListValidator`] runs the pure checks of the pipeline, in fixed order:
//!
//! 1. fixed list-level identity fields (name, keywords, logoURI)
//! 2. timestamp sanity and monotonicity
//! 3. strict version increment
//! 4. intra-document uniqueness (address/name/symbol case-insensitive,
//!    logoURI exact, all scoped per chain)
//! 5. cross-version record immutability
//! 6. chain-ID allow-list
//!
//! Schema conformance runs before this pipeline (listgate-schema) and logo
//! reachability after it (listgate-probe); both are separate crates so this
//! one stays a pure function of `(candidate, previous, now)`.
//!
//! When no previous document is supplied, the regression half of the
//! timestamp check, the version check, and the record-immutability check are
//! vacuously satisfied: a first-ever submission has no baseline.

use std::collections::HashMap;

use crate::document::TokenListDocument;
use crate::policy::ListPolicy;
use crate::temporal::Timestamp;
use crate::token::{TokenKey, TokenRecord};
use crate::violation::{ValidationReport, Violation};

/// Runs the deterministic checks of the pipeline against one policy.
///
/// Construct once per policy; `validate` may be called any number of times
/// and always yields the same report for the same inputs.
#[derive(Debug, Clone)]
pub struct ListValidator {
    policy: ListPolicy,
}

impl ListValidator {
    /// Create a validator enforcing `policy`.
    pub fn new(policy: ListPolicy) -> Self {
        Self { policy }
    }

    /// Run every deterministic check in evaluation order, accumulating
    /// violations. `now` is the evaluation instant, injected so the
    /// future-timestamp check is testable without a wall clock.
    ///
    /// The report's order follows evaluation order; a fail-fast caller
    /// reads [`ValidationReport::first`].
    pub fn validate(
        &self,
        candidate: &TokenListDocument,
        previous: Option<&TokenListDocument>,
        now: Timestamp,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.check_fixed_fields(candidate, &mut report);
        self.check_timestamps(candidate, previous, now, &mut report);
        self.check_version(candidate, previous, &mut report);
        self.check_uniqueness(candidate, &mut report);
        self.check_record_immutability(candidate, previous, &mut report);
        self.check_chain_allowlist(candidate, &mut report);

        tracing::debug!(
            violations = report.len(),
            tokens = candidate.tokens.len(),
            has_previous = previous.is_some(),
            "deterministic checks complete"
        );
        report
    }

    /// Fixed list-level identity: name, keyword superset, list logo.
    fn check_fixed_fields(&self, candidate: &TokenListDocument, report: &mut ValidationReport) {
        if candidate.name != self.policy.list_name {
            report.push(Violation::ImmutableField {
                field: "name".into(),
                expected: self.policy.list_name.clone(),
                actual: candidate.name.clone(),
            });
        }

        let missing = self.policy.missing_keywords(&candidate.keywords);
        if !missing.is_empty() {
            report.push(Violation::ImmutableField {
                field: "keywords".into(),
                expected: format!("must include {}", missing.join(", ")),
                actual: candidate.keywords.join(", "),
            });
        }

        if candidate.logo_uri != self.policy.list_logo_uri {
            report.push(Violation::ImmutableField {
                field: "logoURI".into(),
                expected: self.policy.list_logo_uri.clone(),
                actual: candidate.logo_uri.clone(),
            });
        }
    }

    /// Candidate timestamp must not be in the future and must not regress
    /// relative to the previous version.
    fn check_timestamps(
        &self,
        candidate: &TokenListDocument,
        previous: Option<&TokenListDocument>,
        now: Timestamp,
        report: &mut ValidationReport,
    ) {
        if candidate.timestamp > now {
            report.push(Violation::FutureTimestamp {
                timestamp: candidate.timestamp.to_string(),
                now: now.to_string(),
            });
        }

        if let Some(previous) = previous {
            if candidate.timestamp < previous.timestamp {
                report.push(Violation::TimestampRegression {
                    candidate: candidate.timestamp.to_string(),
                    previous: previous.timestamp.to_string(),
                });
            }
        }
    }

    /// Candidate version must be strictly greater than the previous one,
    /// under triple lexicographic order.
    fn check_version(
        &self,
        candidate: &TokenListDocument,
        previous: Option<&TokenListDocument>,
        report: &mut ValidationReport,
    ) {
        if let Some(previous) = previous {
            if candidate.version <= previous.version {
                report.push(Violation::Version {
                    candidate: candidate.version.to_string(),
                    previous: previous.version.to_string(),
                });
            }
        }
    }

    /// Per-chain uniqueness of address, name, symbol (case-insensitive)
    /// and logoURI (exact string).
    fn check_uniqueness(&self, candidate: &TokenListDocument, report: &mut ValidationReport) {
        let mut by_address: HashMap<TokenKey, &TokenRecord> = HashMap::new();
        let mut by_name: HashMap<(u64, String), &TokenRecord> = HashMap::new();
        let mut by_symbol: HashMap<(u64, String), &TokenRecord> = HashMap::new();
        let mut by_logo: HashMap<(u64, String), &TokenRecord> = HashMap::new();

        for token in &candidate.tokens {
            if let Some(existing) = by_address.insert(token.key(), token) {
                report.push(duplicate(existing, token, "address", &token.address));
            }
            let name_key = (token.chain_id, token.name.to_lowercase());
            if let Some(existing) = by_name.insert(name_key, token) {
                report.push(duplicate(existing, token, "name", &token.name));
            }
            let symbol_key = (token.chain_id, token.symbol.to_lowercase());
            if let Some(existing) = by_symbol.insert(symbol_key, token) {
                report.push(duplicate(existing, token, "symbol", &token.symbol));
            }
            // logoURI is compared exactly, not case-folded.
            let logo_key = (token.chain_id, token.logo_uri.clone());
            if let Some(existing) = by_logo.insert(logo_key, token) {
                report.push(duplicate(existing, token, "logoURI", &token.logo_uri));
            }
        }
    }

    /// Every candidate record whose identity key matches a previous record
    /// must carry identical name, symbol, decimals, and logoURI. A previous
    /// record absent from the candidate is not flagged.
    fn check_record_immutability(
        &self,
        candidate: &TokenListDocument,
        previous: Option<&TokenListDocument>,
        report: &mut ValidationReport,
    ) {
        let Some(previous) = previous else {
            return;
        };

        let baseline: HashMap<TokenKey, &TokenRecord> =
            previous.tokens.iter().map(|t| (t.key(), t)).collect();

        for token in &candidate.tokens {
            let Some(prior) = baseline.get(&token.key()) else {
                continue;
            };
            if token.immutable_fields_match(prior) {
                continue;
            }
            for (field, was, is) in [
                ("name", &prior.name, &token.name),
                ("symbol", &prior.symbol, &token.symbol),
                ("logoURI", &prior.logo_uri, &token.logo_uri),
            ] {
                if was != is {
                    report.push(Violation::ImmutableRecord {
                        key: token.key().to_string(),
                        symbol: token.symbol.clone(),
                        field: field.into(),
                        previous: was.clone(),
                        candidate: is.clone(),
                    });
                }
            }
            if prior.decimals != token.decimals {
                report.push(Violation::ImmutableRecord {
                    key: token.key().to_string(),
                    symbol: token.symbol.clone(),
                    field: "decimals".into(),
                    previous: prior.decimals.to_string(),
                    candidate: token.decimals.to_string(),
                });
            }
        }
    }

    /// Every record's chain ID must be in the policy's allow-set.
    fn check_chain_allowlist(&self, candidate: &TokenListDocument, report: &mut ValidationReport) {
        for token in &candidate.tokens {
            if !self.policy.allows_chain(token.chain_id) {
                report.push(Violation::ChainId {
                    symbol: token.symbol.clone(),
                    chain_id: token.chain_id,
                });
            }
        }
    }
}

/// Build a duplicate violation naming both conflicting records.
fn duplicate(first: &TokenRecord, second: &TokenRecord, field: &str, value: &str) -> Violation {
    Violation::Duplicate {
        field: field.into(),
        chain_id: second.chain_id,
        first: first.symbol.clone(),
        second: second.symbol.clone(),
        value: value.to_string(),
    }
}

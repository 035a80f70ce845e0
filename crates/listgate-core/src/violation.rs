//! # Violation Taxonomy
//!
//! Every failed check becomes a [`Violation`] carrying structured context;
//! [`ViolationKind`] is the machine-distinguishable classification a CI
//! caller can branch on. [`ValidationReport`] accumulates violations in
//! evaluation order, so fail-fast callers read element zero.

use thiserror::Error;

/// Machine-distinguishable classification of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Structural/type mismatch against the expected document shape.
    Schema,
    /// A list-level fixed field (name, keywords, logo) was changed.
    ImmutableField,
    /// Future timestamp, or regression relative to the previous version.
    Timestamp,
    /// Version not strictly incremented.
    Version,
    /// A uniqueness invariant violated within the candidate's records.
    Duplicate,
    /// An existing record's immutable fields were altered.
    ImmutableRecord,
    /// A record references a chain ID outside the allow-set.
    ChainId,
    /// A record's logo resource could not be confirmed reachable.
    UnreachableLogo,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Schema => "SchemaViolation",
            Self::ImmutableField => "ImmutableFieldViolation",
            Self::Timestamp => "TimestampViolation",
            Self::Version => "VersionViolation",
            Self::Duplicate => "DuplicateViolation",
            Self::ImmutableRecord => "ImmutableRecordViolation",
            Self::ChainId => "ChainIdViolation",
            Self::UnreachableLogo => "UnreachableLogoViolation",
        };
        f.write_str(s)
    }
}

/// One governance violation with human-readable message and structured context.
///
/// All variants are recoverable at the validator's boundary: nothing here
/// aborts the process, the caller decides what to do with the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The document does not conform to the token-list schema.
    #[error("schema violation at {instance_path}: {detail}")]
    Schema {
        /// JSON Pointer to the violating field (empty string for the root).
        instance_path: String,
        /// Schema-level error detail.
        detail: String,
    },

    /// A list-level fixed field differs from the policy's required value.
    #[error("immutable list field '{field}' changed: expected {expected:?}, got {actual:?}")]
    ImmutableField {
        /// Which field: "name", "keywords", or "logoURI".
        field: String,
        /// The policy-required value (for keywords, the missing entries).
        expected: String,
        /// What the candidate carries.
        actual: String,
    },

    /// The candidate's timestamp is in the future.
    #[error("timestamp {timestamp} is in the future (validation time {now})")]
    FutureTimestamp {
        /// The candidate's timestamp.
        timestamp: String,
        /// The injected evaluation instant.
        now: String,
    },

    /// The candidate's timestamp regressed relative to the previous version.
    #[error("timestamp {candidate} is before the previous version's {previous}")]
    TimestampRegression {
        /// The candidate's timestamp.
        candidate: String,
        /// The previous version's timestamp.
        previous: String,
    },

    /// The candidate's version is not strictly greater than the previous one.
    #[error("version {candidate} must be strictly greater than previous version {previous}")]
    Version {
        /// The candidate's version triple.
        candidate: String,
        /// The previous version triple.
        previous: String,
    },

    /// Two records collide on a per-chain uniqueness invariant.
    #[error(
        "duplicate {field} on chain {chain_id}: '{first}' and '{second}' share {value:?}"
    )]
    Duplicate {
        /// Which field collided: "address", "name", "symbol", or "logoURI".
        field: String,
        /// Chain the collision is scoped to.
        chain_id: u64,
        /// Symbol of the first conflicting record.
        first: String,
        /// Symbol of the second conflicting record.
        second: String,
        /// The colliding value.
        value: String,
    },

    /// A record matched by identity key changed one of its frozen fields.
    #[error("record {key} ('{symbol}') altered immutable field '{field}': {previous:?} -> {candidate:?}")]
    ImmutableRecord {
        /// Identity key of the record.
        key: String,
        /// Symbol of the candidate record.
        symbol: String,
        /// Which frozen field changed.
        field: String,
        /// Previous value.
        previous: String,
        /// Candidate value.
        candidate: String,
    },

    /// A record references a chain outside the allow-set.
    #[error("record '{symbol}' references chain {chain_id}, which is not in the allowed set")]
    ChainId {
        /// Symbol of the offending record.
        symbol: String,
        /// The disallowed chain ID.
        chain_id: u64,
    },

    /// A record's logo could not be confirmed reachable.
    #[error("logo for '{symbol}' unreachable at {uri}: {reason}")]
    UnreachableLogo {
        /// Symbol of the offending record.
        symbol: String,
        /// The probed URI.
        uri: String,
        /// Either "status NNN" or the transport error/timeout description.
        reason: String,
    },
}

impl Violation {
    /// The machine-distinguishable kind of this violation.
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::Schema { .. } => ViolationKind::Schema,
            Self::ImmutableField { .. } => ViolationKind::ImmutableField,
            Self::FutureTimestamp { .. } | Self::TimestampRegression { .. } => {
                ViolationKind::Timestamp
            }
            Self::Version { .. } => ViolationKind::Version,
            Self::Duplicate { .. } => ViolationKind::Duplicate,
            Self::ImmutableRecord { .. } => ViolationKind::ImmutableRecord,
            Self::ChainId { .. } => ViolationKind::ChainId,
            Self::UnreachableLogo { .. } => ViolationKind::UnreachableLogo,
        }
    }
}

/// The outcome of a validation run: an ordered accumulation of violations.
///
/// Order follows evaluation order, so under fail-fast reporting the first
/// element is exactly what a fail-fast run would have stopped on.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// An empty (passing) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Append every violation from `other`, preserving order.
    pub fn extend(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// True when no violation was recorded.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation in evaluation order, if any.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// All violations in evaluation order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl From<Vec<Violation>> for ValidationReport {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {v}", v.kind())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let v = Violation::ChainId {
            symbol: "FOO".into(),
            chain_id: 1,
        };
        assert_eq!(v.kind(), ViolationKind::ChainId);

        let future = Violation::FutureTimestamp {
            timestamp: "2027-01-01T00:00:00Z".into(),
            now: "2026-01-01T00:00:00Z".into(),
        };
        let regression = Violation::TimestampRegression {
            candidate: "2026-01-01T00:00:00Z".into(),
            previous: "2026-02-01T00:00:00Z".into(),
        };
        assert_eq!(future.kind(), ViolationKind::Timestamp);
        assert_eq!(regression.kind(), ViolationKind::Timestamp);
    }

    #[test]
    fn test_report_order_preserved() {
        let mut report = ValidationReport::new();
        report.push(Violation::ChainId {
            symbol: "A".into(),
            chain_id: 1,
        });
        report.push(Violation::ChainId {
            symbol: "B".into(),
            chain_id: 2,
        });
        let symbols: Vec<_> = report
            .violations()
            .iter()
            .map(|v| match v {
                Violation::ChainId { symbol, .. } => symbol.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(symbols, vec!["A", "B"]);
        assert_eq!(report.first(), Some(&report.violations()[0]));
    }

    #[test]
    fn test_display_prefixes_kind() {
        let mut report = ValidationReport::new();
        report.push(Violation::Version {
            candidate: "1.0.0".into(),
            previous: "1.0.0".into(),
        });
        let rendered = report.to_string();
        assert!(rendered.starts_with("VersionViolation: "));
        assert!(rendered.contains("strictly greater"));
    }

    #[test]
    fn test_clean_report() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(report.first().is_none());
        assert_eq!(report.to_string(), "");
    }
}

//! # listgate-core — Token-List Data Model and Deterministic Checks
//!
//! This crate is the foundation of the listgate validator. It defines the
//! token-list document model, the governance policy value, the structured
//! violation taxonomy, and the pure validation pipeline that compares a
//! candidate document against the previously accepted version.
//!
//! ## Key Design Principles
//!
//! 1. **Policy is a value, not a constant.** All governance knobs (required
//!    list name/keywords/logo, allowed chain IDs) arrive through
//!    [`ListPolicy`]; nothing is hardcoded, so the same pipeline can gate a
//!    different list and tests can swap policies freely.
//!
//! 2. **The pipeline is pure.** [`ListValidator::validate`] is a function of
//!    `(candidate, previous, now)` — the evaluation instant is injected, and
//!    no network or filesystem access happens here. Schema conformance
//!    (listgate-schema) and logo reachability (listgate-probe) live in
//!    sibling crates.
//!
//! 3. **Violations are data.** Every failed check becomes a [`Violation`]
//!    variant carrying structured context; the caller decides whether to
//!    fail fast or accumulate, and how to surface the messages.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `listgate-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod policy;
pub mod temporal;
pub mod token;
pub mod validator;
pub mod version;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use document::{DocumentError, TokenListDocument};
pub use policy::ListPolicy;
pub use temporal::Timestamp;
pub use token::{TokenKey, TokenRecord};
pub use validator::ListValidator;
pub use version::ListVersion;
pub use violation::{ValidationReport, Violation, ViolationKind};

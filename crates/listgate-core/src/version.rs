//! # List Version — Ordered Semver Triple
//!
//! Token lists carry a `{major, minor, patch}` version object. The derived
//! ordering is lexicographic over the triple, which is exactly the ordering
//! the strict-increment rule needs: any bump in a more significant position
//! wins regardless of the less significant ones.

use serde::{Deserialize, Serialize};

/// The version of a token-list document.
///
/// Field order matters: `Ord` is derived, so comparison is lexicographic
/// over `(major, minor, patch)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ListVersion {
    /// Incremented for breaking changes to the list.
    pub major: u64,
    /// Incremented when tokens are added.
    pub minor: u64,
    /// Incremented for metadata-only corrections.
    pub patch: u64,
}

impl ListVersion {
    /// Construct a version from its three components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }
}

impl std::fmt::Display for ListVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ListVersion::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn test_equal_versions_not_greater() {
        let v = ListVersion::new(1, 0, 0);
        assert!(!(v > v));
        assert_eq!(v, v);
    }

    #[test]
    fn test_patch_bump_is_greater() {
        assert!(ListVersion::new(1, 0, 1) > ListVersion::new(1, 0, 0));
    }

    #[test]
    fn test_minor_bump_outranks_patch() {
        assert!(ListVersion::new(1, 1, 0) > ListVersion::new(1, 0, 9));
    }

    #[test]
    fn test_major_bump_outranks_minor_and_patch() {
        assert!(ListVersion::new(2, 0, 0) > ListVersion::new(1, 99, 99));
    }

    #[test]
    fn test_regression_is_lesser() {
        assert!(ListVersion::new(0, 9, 9) < ListVersion::new(1, 0, 0));
    }

    #[test]
    fn test_serde_object_shape() {
        let v: ListVersion =
            serde_json::from_str(r#"{"major":1,"minor":2,"patch":3}"#).unwrap();
        assert_eq!(v, ListVersion::new(1, 2, 3));
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json, serde_json::json!({"major":1,"minor":2,"patch":3}));
    }
}

//! # Token Records and Identity Keys
//!
//! One [`TokenRecord`] per listed asset, modeling the wire shape of a
//! token-list entry (camelCase field names). The [`TokenKey`] identity key —
//! `(chainId, lowercase(address))` — is what matches a record across
//! document versions; everything else about a listed record is immutable
//! once accepted.

use serde::{Deserialize, Serialize};

/// One listed asset's metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    /// Blockchain network the token contract resides on.
    pub chain_id: u64,
    /// Contract address, `0x` + 40 hex characters.
    pub address: String,
    /// Human-readable asset name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Number of decimal places the token uses.
    pub decimals: u32,
    /// Absolute URI of the token's logo image.
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
}

impl TokenRecord {
    /// The identity key matching this record across document versions.
    pub fn key(&self) -> TokenKey {
        TokenKey::new(self.chain_id, &self.address)
    }

    /// Whether the fields frozen after first acceptance (name, symbol,
    /// decimals, logoURI) are identical to `other`'s. Exact string
    /// comparison; the identity key is compared separately by the caller.
    pub fn immutable_fields_match(&self, other: &TokenRecord) -> bool {
        self.name == other.name
            && self.symbol == other.symbol
            && self.decimals == other.decimals
            && self.logo_uri == other.logo_uri
    }
}

/// The `(chainId, lowercase(address))` identity key of a token record.
///
/// Case-folding the address at construction means two spellings of the same
/// contract address collapse to one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenKey {
    chain_id: u64,
    address: String,
}

impl TokenKey {
    /// Build a key, lowercasing the address.
    pub fn new(chain_id: u64, address: &str) -> Self {
        Self {
            chain_id,
            address: address.to_lowercase(),
        }
    }

    /// The chain ID half of the key.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The lowercased address half of the key.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl std::fmt::Display for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TokenRecord {
        TokenRecord {
            chain_id: 89898,
            address: "0xAA000000000000000000000000000000000000aa".into(),
            name: "Foo Token".into(),
            symbol: "FOO".into(),
            decimals: 18,
            logo_uri: "https://img.example/foo.png".into(),
        }
    }

    #[test]
    fn test_key_lowercases_address() {
        let key = record().key();
        assert_eq!(key.address(), "0xaa000000000000000000000000000000000000aa");
        assert_eq!(key.chain_id(), 89898);
    }

    #[test]
    fn test_keys_match_across_case() {
        let a = TokenKey::new(1, "0xABC");
        let b = TokenKey::new(1, "0xabc");
        assert_eq!(a, b);
    }

    #[test]
    fn test_keys_differ_across_chains() {
        let a = TokenKey::new(89898, "0xabc");
        let b = TokenKey::new(2786, "0xabc");
        assert_ne!(a, b);
    }

    #[test]
    fn test_immutable_fields_match_identical() {
        assert!(record().immutable_fields_match(&record()));
    }

    #[test]
    fn test_immutable_fields_mismatch_on_decimals() {
        let mut changed = record();
        changed.decimals = 6;
        assert!(!record().immutable_fields_match(&changed));
    }

    #[test]
    fn test_wire_shape_camel_case() {
        let json = serde_json::json!({
            "chainId": 2786,
            "address": "0xbb000000000000000000000000000000000000bb",
            "name": "Bar",
            "symbol": "BAR",
            "decimals": 6,
            "logoURI": "https://img.example/bar.png"
        });
        let rec: TokenRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(rec.chain_id, 2786);
        assert_eq!(rec.logo_uri, "https://img.example/bar.png");
        assert_eq!(serde_json::to_value(&rec).unwrap(), json);
    }
}

//! Operation digest type
//!
//! The raw 32-byte identifier of an operation, as handed to the validation
//! entry point by the relay. This is NOT the value the owner's wallet signs —
//! wallets sign the personal-message wrap of it (see `custos-crypto`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when parsing a digest from its hex form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestParseError {
    #[error("digest must be 0x + 64 hex chars, got {len} chars")]
    BadLength { len: usize },

    #[error("digest contains invalid hex: {0}")]
    BadHex(String),
}

/// A 32-byte operation digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpDigest(pub [u8; 32]);

impl OpDigest {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for OpDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for OpDigest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() != 64 {
            return Err(DigestParseError::BadLength { len: s.len() });
        }
        let bytes = hex::decode(stripped).map_err(|e| DigestParseError::BadHex(e.to_string()))?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl From<[u8; 32]> for OpDigest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for OpDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for OpDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for OpDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_roundtrip() {
        let digest = OpDigest::from_bytes([0x7f; 32]);
        let parsed: OpDigest = digest.to_string().parse().unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn parse_rejects_short_input() {
        let result = OpDigest::from_str("0xdeadbeef");
        assert!(matches!(result, Err(DigestParseError::BadLength { .. })));
    }

    #[test]
    fn serde_uses_hex_form() {
        let digest = OpDigest::from_bytes([0x01; 32]);
        let json = serde_json::to_string(&digest).unwrap();
        let back: OpDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}

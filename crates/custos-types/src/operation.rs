//! Operation and call types
//!
//! An `Operation` is the unit of work a relay submits for validation: a
//! requested call plus the owner signature that authorizes it. There is
//! deliberately no nonce field — this core performs no replay tracking, and
//! an operation that validates once will validate again.

use crate::Address;
use serde::{Deserialize, Serialize};

/// A requested action plus its authorizing signature.
///
/// The operation digest travels next to the operation, not inside it: the
/// validation entry point takes `(operation, digest, missing_funds)` and the
/// digest is produced by the submitter's infrastructure, not recomputed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Call destination
    pub dest: Address,
    /// Value to carry with the call
    pub value: u128,
    /// Opaque call payload
    #[serde(with = "hex_bytes")]
    pub payload: Vec<u8>,
    /// Owner signature over the wrapped operation digest (65 bytes r || s || v)
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

/// Raw result of one generic call dispatch.
///
/// Transient: exists only for the duration of one dispatch. Callers must
/// inspect `success` explicitly — a failed call is a value, not an exception,
/// until a caller chooses to escalate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    /// Whether the call completed without reverting
    pub success: bool,
    /// Returned bytes on success, revert payload on failure
    pub data: Vec<u8>,
}

impl CallResult {
    /// A successful call with return data
    pub fn ok(data: Vec<u8>) -> Self {
        Self { success: true, data }
    }

    /// A failed call carrying the revert payload
    pub fn reverted(data: Vec<u8>) -> Self {
        Self { success: false, data }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(serde::de::Error::custom)
    }
}

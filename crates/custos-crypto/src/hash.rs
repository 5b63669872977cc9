//! Hashing utilities for Custos

use custos_types::OpDigest;
use sha3::{Digest, Keccak256};

/// Prefix of the personal-message wrap for a 32-byte digest
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute Keccak-256 hash of data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute Keccak-256 hash and return as hex string
pub fn keccak256_hex(data: &[u8]) -> String {
    hex::encode(keccak256(data))
}

/// Compute Keccak-256 over multiple items
pub fn keccak_all(items: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for item in items {
        hasher.update(item);
    }
    hasher.finalize().into()
}

/// The canonical signed-message digest for a raw operation digest.
///
/// The digest as received is not itself the object the owner's wallet signs:
/// wallets sign `keccak256("\x19Ethereum Signed Message:\n32" || digest)`.
/// Recovery must run against this wrapped form.
pub fn signed_message_digest(digest: &OpDigest) -> [u8; 32] {
    keccak_all(&[SIGNED_MESSAGE_PREFIX, digest.as_bytes()])
}

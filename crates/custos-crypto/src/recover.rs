//! Signer recovery from recoverable ECDSA signatures
//!
//! Signatures are the 65-byte `r || s || v` form. `v` is accepted in both
//! the Ethereum convention (27/28) and the raw recovery-id form (0/1).
//! Every malformation is an `Err`, never a panic: the signature validator
//! upstream maps recovery failures to a `Rejected` outcome.

use crate::{keccak256, CryptoError, CryptoResult};
use custos_types::Address;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint as _;

/// Derive the Ethereum-compatible address of a verifying key.
///
/// Algorithm: `keccak256(uncompressed_public_key_bytes[1..])[12..]`
pub fn address_of(key: &VerifyingKey) -> Address {
    let encoded = key.to_encoded_point(false); // uncompressed
    let pubkey_bytes = encoded.as_bytes();
    // Skip the 0x04 prefix byte, hash the 64 bytes of (x, y).
    let hash = keccak256(&pubkey_bytes[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    Address::from_bytes(addr)
}

/// Recover the signing address from a prehashed message and a 65-byte
/// `r || s || v` signature.
pub fn recover_address(prehash: &[u8; 32], signature: &[u8]) -> CryptoResult<Address> {
    if signature.len() != 65 {
        return Err(CryptoError::MalformedSignature(format!(
            "expected 65 bytes, got {}",
            signature.len()
        )));
    }

    let v = signature[64];
    let recovery_byte = match v {
        27 | 28 => v - 27,
        0 | 1 => v,
        other => return Err(CryptoError::InvalidRecoveryId(other)),
    };
    let recovery_id =
        RecoveryId::from_byte(recovery_byte).ok_or(CryptoError::InvalidRecoveryId(v))?;

    let sig = Signature::from_slice(&signature[..64])
        .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;

    let key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;

    Ok(address_of(&key))
}

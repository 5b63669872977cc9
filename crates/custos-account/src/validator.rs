//! Signature validator
//!
//! Converts an opaque signature into a binary accept/reject decision:
//! wrap the raw digest into the canonical signed-message form, recover the
//! signing identity, compare it to the current owner. Read-only and
//! deterministic — all state transitions implied by an `Accepted` outcome
//! happen in the caller, never here.

use custos_crypto::{recover_address, signed_message_digest};
use custos_types::{Address, OpDigest, ValidationOutcome};
use tracing::trace;

/// Decide whether `signature` over the wrapped form of `digest` was
/// produced by `owner`.
///
/// Malformed signatures and failed recoveries are a `Rejected` outcome,
/// not an error: rejection is a normal result of validation.
pub fn validate_signature(
    digest: &OpDigest,
    signature: &[u8],
    owner: Address,
) -> ValidationOutcome {
    let wrapped = signed_message_digest(digest);
    match recover_address(&wrapped, signature) {
        Ok(signer) if signer == owner => ValidationOutcome::Accepted,
        Ok(signer) => {
            trace!(%signer, %owner, "recovered signer is not the owner");
            ValidationOutcome::Rejected
        }
        Err(e) => {
            trace!(error = %e, "signature recovery failed");
            ValidationOutcome::Rejected
        }
    }
}

//! Owner wallet — the signing side of the protocol
//!
//! The account core only ever *recovers* signers; this wallet is what the
//! owner (or a demo, or a test) uses to produce the 65-byte signatures the
//! core validates. Keys can be derived deterministically from a label so
//! demo identities are stable across runs, or generated from a CSPRNG.

use crate::{address_of, signed_message_digest, CryptoError, CryptoResult};
use custos_types::{Address, OpDigest};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

/// A secp256k1 owner wallet.
///
/// The signing key never leaves the wallet; callers receive the address and
/// finished signatures only.
pub struct OwnerWallet {
    /// secp256k1 ECDSA signing key (never exported)
    signing_key: SigningKey,
    /// Cached Ethereum-compatible address
    address: Address,
    /// Human-readable label
    pub label: String,
}

impl OwnerWallet {
    /// Create a wallet from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32], label: impl Into<String>) -> Self {
        let signing_key = SigningKey::from_bytes(seed.into())
            .expect("valid secp256k1 key from 32-byte seed");
        let address = address_of(signing_key.verifying_key());
        Self { signing_key, address, label: label.into() }
    }

    /// Create a deterministic wallet from a label (stable demo identity).
    pub fn for_label(label: &str) -> Self {
        let seed = blake3::derive_key("custos owner wallet seed v1", label.as_bytes());
        Self::from_seed(&seed, label)
    }

    /// Create a wallet with a fresh random key.
    pub fn random(label: impl Into<String>) -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        let address = address_of(signing_key.verifying_key());
        Self { signing_key, address, label: label.into() }
    }

    /// The Ethereum-compatible address of this wallet.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign an operation digest the way a wallet does: over its
    /// personal-message wrap. Returns the 65-byte `r || s || v` signature
    /// with `v` in the Ethereum 27/28 convention.
    pub fn sign_digest(&self, digest: &OpDigest) -> CryptoResult<[u8; 65]> {
        let prehash = signed_message_digest(digest);
        self.sign_prehash_raw(&prehash)
    }

    /// Sign an already-prepared 32-byte prehash directly, with no wrapping.
    pub fn sign_prehash_raw(&self, prehash: &[u8; 32]) -> CryptoResult<[u8; 65]> {
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let sig_bytes = sig.to_bytes();
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&sig_bytes);
        out[64] = recovery_id.to_byte() + 27; // Ethereum v encoding
        Ok(out)
    }
}

impl std::fmt::Debug for OwnerWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerWallet")
            .field("label", &self.label)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recover_address;

    #[test]
    fn deterministic_wallet_stable_across_calls() {
        let a = OwnerWallet::for_label("alice");
        let b = OwnerWallet::for_label("alice");
        assert_eq!(a.address(), b.address(), "same label must give same address");
    }

    #[test]
    fn different_labels_have_different_addresses() {
        let alice = OwnerWallet::for_label("alice");
        let bob = OwnerWallet::for_label("bob");
        assert_ne!(alice.address(), bob.address());
    }

    #[test]
    fn random_wallets_are_distinct() {
        let a = OwnerWallet::random("a");
        let b = OwnerWallet::random("b");
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn signature_has_ethereum_v() {
        let wallet = OwnerWallet::for_label("v-check");
        let sig = wallet.sign_digest(&OpDigest::from_bytes([0x55; 32])).unwrap();
        assert!(sig[64] == 27 || sig[64] == 28, "v must be 27 or 28, got {}", sig[64]);
    }

    #[test]
    fn sign_digest_covers_the_wrapped_form() {
        let wallet = OwnerWallet::for_label("wrap-check");
        let digest = OpDigest::from_bytes([0x77; 32]);
        let sig = wallet.sign_digest(&digest).unwrap();

        let wrapped = signed_message_digest(&digest);
        let recovered = recover_address(&wrapped, &sig).unwrap();
        assert_eq!(recovered, wallet.address());

        // The same signature over the raw digest recovers someone else (or fails).
        match recover_address(digest.as_bytes(), &sig) {
            Ok(addr) => assert_ne!(addr, wallet.address()),
            Err(_) => {}
        }
    }
}

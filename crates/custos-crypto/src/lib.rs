//! Custos Crypto - Cryptographic primitives for the smart-account core
//!
//! This crate provides:
//! - Keccak-256 hashing
//! - The personal-message digest wrap (the form wallets actually sign)
//! - Recoverable secp256k1 ECDSA: signing and address recovery
//! - The owner wallet (signing side) used by relays, demos and tests
//!
//! # Security Invariant
//!
//! **Signing keys never leave the wallet.** Callers receive addresses and
//! 65-byte signatures only.

pub mod hash;
pub mod recover;
pub mod wallet;

pub use hash::*;
pub use recover::*;
pub use wallet::*;

use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("signer recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),
}

pub type CryptoResult<T> = Result<T, CryptoError>;

//! Custos Account - The smart-account authorization core
//!
//! A single designated owner authorizes arbitrary operations by signature;
//! a single trusted operator (the relay) is the only party permitted to
//! submit those operations for validation. The core decides, per submitted
//! operation, whether it is authentically authorized by the owner — and if
//! so, settles any funds owed to the relay for having submitted it.
//!
//! Components:
//! - [`OwnershipStore`] — source of truth for the owner identity
//! - authorization gateway ([`gate`]) — the two caller guards
//! - signature validator ([`validator`]) — digest wrap + recovery + compare
//! - [`SmartAccount`] — execution dispatcher, validation entry point,
//!   prefund settlement
//!
//! # Known gap
//!
//! There is NO replay or nonce protection: an operation whose digest and
//! signature validate will validate on every resubmission. This is a
//! deliberate property of the minimal core, not an oversight — relays are
//! trusted not to resubmit, and uniqueness tracking belongs to a layer
//! above this one.

pub mod account;
pub mod gate;
pub mod ownership;
pub mod validator;

pub use account::SmartAccount;
pub use gate::{require_operator, require_operator_or_owner};
pub use ownership::OwnershipStore;
pub use validator::validate_signature;

use custos_types::Address;
use thiserror::Error;

/// Errors that abort an account invocation.
///
/// Validation *rejection* is not here: a rejected signature is a normal
/// outcome value (`ValidationOutcome::Rejected`), not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("caller {caller} is not the trusted operator")]
    NotFromOperator { caller: Address },

    #[error("caller {caller} is neither the trusted operator nor the owner")]
    NotFromOperatorOrOwner { caller: Address },

    #[error("inner call failed with revert data 0x{}", hex::encode(.return_data))]
    CallFailed { return_data: Vec<u8> },
}

pub type Result<T> = std::result::Result<T, AccountError>;

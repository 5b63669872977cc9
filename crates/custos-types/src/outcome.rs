//! Validation outcome types
//!
//! Validation is binary. A rejected signature is a normal, non-exceptional
//! result of validation — it is distinguished from the error surface
//! (authorization failures, dispatch failures), which aborts the invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The decision of one signature validation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The recovered signer is the current owner
    Accepted,
    /// The signature is malformed or the recovered signer is not the owner
    Rejected,
}

impl ValidationOutcome {
    /// True when the outcome is `Accepted`
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Pack the outcome and its validity window into a 32-byte word.
    ///
    /// Layout (big-endian): `valid_after` in bits 208..256, `valid_until`
    /// in bits 160..208, and the failure sentinel in the low 160 bits —
    /// zero on acceptance, one on rejection. This core always emits the
    /// unrestricted window: both time fields are zero.
    pub fn packed_validity(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        if let Self::Rejected = self {
            word[31] = 1;
        }
        word
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_packs_to_zero_word() {
        assert_eq!(ValidationOutcome::Accepted.packed_validity(), [0u8; 32]);
    }

    #[test]
    fn rejected_packs_sentinel_in_low_bits() {
        let word = ValidationOutcome::Rejected.packed_validity();
        assert_eq!(word[31], 1);
        assert!(word[..31].iter().all(|b| *b == 0), "window fields must stay zero");
    }

    #[test]
    fn outcome_is_binary() {
        assert!(ValidationOutcome::Accepted.is_accepted());
        assert!(!ValidationOutcome::Rejected.is_accepted());
    }

    #[test]
    fn serde_form_is_snake_case() {
        let json = serde_json::to_string(&ValidationOutcome::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
    }
}

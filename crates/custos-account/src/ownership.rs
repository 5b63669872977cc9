//! Ownership store — source of truth for the owner identity
//!
//! Composed into the account rather than inherited. There is exactly one
//! writer path for the owner: `set_owner`, driven by an external ownership
//! rotation flow that is not part of this core.

use custos_types::Address;
use tracing::info;

/// Holds the single authorized controller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipStore {
    owner: Address,
}

impl OwnershipStore {
    /// Create a store with an initial owner.
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    /// The current owner identity.
    pub fn current_owner(&self) -> Address {
        self.owner
    }

    /// Replace the owner identity.
    pub fn set_owner(&mut self, new_owner: Address) {
        info!(old = %self.owner, new = %new_owner, "owner rotated");
        self.owner = new_owner;
    }
}

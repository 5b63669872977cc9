//! The smart account: dispatcher, validation entry point, prefund settlement
//!
//! Every state-changing entry point runs its authorization guard first;
//! everything after the guard operates from the account's own address on
//! the host ledger. The operator identity is bound once at construction
//! and never mutated.

use crate::{gate, validator, AccountError, OwnershipStore};
use custos_host::{EntryReason, HostLedger};
use custos_types::{Address, OpDigest, Operation, ValidationOutcome};
use tracing::{info, warn};

/// A minimal smart account bound to one owner and one trusted operator.
#[derive(Debug, Clone)]
pub struct SmartAccount {
    /// The account's own address on the host ledger
    address: Address,
    /// Trusted relay identity, fixed at construction
    operator: Address,
    /// Owner identity store
    ownership: OwnershipStore,
}

impl SmartAccount {
    /// Construct an account. The operator is bound here, exactly once.
    pub fn new(address: Address, owner: Address, operator: Address) -> Self {
        Self {
            address,
            operator,
            ownership: OwnershipStore::new(owner),
        }
    }

    /// The account's own address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Read-only accessor for the trusted operator. Unguarded.
    pub fn trusted_operator(&self) -> Address {
        self.operator
    }

    /// The ownership store (read side).
    pub fn ownership(&self) -> &OwnershipStore {
        &self.ownership
    }

    /// The ownership store (write side) — the external owner-rotation path.
    pub fn ownership_mut(&mut self) -> &mut OwnershipStore {
        &mut self.ownership
    }

    /// Dispatch a generic call on behalf of the account.
    ///
    /// Guarded by operator-or-owner. On failure the inner revert payload is
    /// surfaced verbatim in [`AccountError::CallFailed`]; on success any
    /// returned bytes are discarded — this is a fire-and-forget primitive.
    /// No retries: a failed attempt is a failed operation.
    pub fn execute(
        &self,
        host: &mut HostLedger,
        caller: Address,
        dest: Address,
        value: u128,
        payload: &[u8],
    ) -> crate::Result<()> {
        gate::require_operator_or_owner(self.operator, self.ownership.current_owner(), caller)?;

        let result = host.call(self.address, dest, value, payload);
        if !result.success {
            return Err(AccountError::CallFailed { return_data: result.data });
        }

        info!(%dest, value, "dispatched call");
        Ok(())
    }

    /// Decide whether an operation is authentically authorized by the owner.
    ///
    /// Guarded by operator-only: validation requests are tied to the trusted
    /// relay that is expected to subsequently execute the approved
    /// operation. The prefund settlement runs regardless of the outcome —
    /// the relay is reimbursed for the validation attempt itself.
    ///
    /// No replay tracking: a triple that validates once validates again.
    pub fn validate_operation(
        &self,
        host: &mut HostLedger,
        caller: Address,
        op: &Operation,
        digest: OpDigest,
        missing_funds: u128,
    ) -> crate::Result<ValidationOutcome> {
        gate::require_operator(self.operator, caller)?;

        let outcome = validator::validate_signature(&digest, &op.signature, self.ownership.current_owner());
        info!(%digest, %outcome, missing_funds, "operation validated");

        self.pay_prefund(host, caller, missing_funds);
        Ok(outcome)
    }

    /// Reimburse the immediate caller for submission costs.
    ///
    /// A zero amount is a no-op. The transfer's failure is deliberately not
    /// propagated — the asymmetry with `execute` is part of the contract.
    pub fn pay_prefund(&self, host: &mut HostLedger, to: Address, amount: u128) {
        if amount == 0 {
            return;
        }
        if let Err(e) = host.transfer(self.address, to, amount, EntryReason::Prefund { relay: to }) {
            warn!(%to, amount, error = %e, "prefund transfer failed; ignoring");
        }
    }
}

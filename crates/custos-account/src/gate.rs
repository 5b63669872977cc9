//! Authorization gateway — the two caller guards
//!
//! Pure predicate checks, invoked first in every state-changing entry
//! point. Failure aborts the enclosing invocation with no state change.
//! The guards read only construction-time and ownership-store state, so
//! they remain correct when a destination re-enters the account mid-call.

use crate::AccountError;
use custos_types::Address;
use tracing::debug;

/// Fails with [`AccountError::NotFromOperator`] unless the caller is the
/// trusted operator.
pub fn require_operator(operator: Address, caller: Address) -> crate::Result<()> {
    if caller != operator {
        return Err(AccountError::NotFromOperator { caller });
    }
    debug!(%caller, "operator guard passed");
    Ok(())
}

/// Fails with [`AccountError::NotFromOperatorOrOwner`] unless the caller is
/// the trusted operator or the current owner.
pub fn require_operator_or_owner(
    operator: Address,
    owner: Address,
    caller: Address,
) -> crate::Result<()> {
    if caller != operator && caller != owner {
        return Err(AccountError::NotFromOperatorOrOwner { caller });
    }
    debug!(%caller, "operator-or-owner guard passed");
    Ok(())
}

//! Custos Host - The ledger the smart account lives on
//!
//! The host ledger provides what the account core assumes from its
//! environment:
//! - Per-address balances with a no-negative invariant
//! - An append-only journal (every movement has a reason)
//! - A contract registry and the generic value-carrying call primitive
//! - All-or-nothing unwinding of failed invocations
//!
//! Execution is synchronous and single-threaded: invocations are strictly
//! serialized and never suspend mid-flight. Destination code runs with
//! `&mut HostLedger`, so a callee can re-enter account entry points before
//! the enclosing invocation finishes — guards upstream must stay correct
//! under that re-entry.
//!
//! # Invariants
//!
//! 1. No negative balances
//! 2. Every journal entry has a reason
//! 3. A failed call restores balances and journal to the pre-call state

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use custos_types::{Address, CallResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};
use uuid::Uuid;

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("insufficient balance: have {available}, need {required}")]
    InsufficientBalance { available: u128, required: u128 },

    #[error("balance overflow on credit of {amount}")]
    BalanceOverflow { amount: u128 },

    #[error("amount must be greater than zero")]
    ZeroAmount,
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Unique identifier for a journal entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new() -> Self {
        Self(format!("entry_{}", Uuid::new_v4()))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryDirection {
    /// Balance increase
    Credit,
    /// Balance decrease
    Debit,
}

/// Reason for a journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryReason {
    /// External deposit (the unguarded receive-funds entry)
    Deposit,
    /// Value carried by a generic call
    CallValue { caller: Address },
    /// Prefund settlement from an account to its relay
    Prefund { relay: Address },
}

/// One side of a balance movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: EntryId,
    pub account: Address,
    pub direction: EntryDirection,
    pub amount: u128,
    pub balance_after: u128,
    pub reason: EntryReason,
    pub created_at: DateTime<Utc>,
}

/// Execution context handed to destination code
#[derive(Debug, Clone)]
pub struct CallContext {
    /// The immediate caller of this call frame
    pub caller: Address,
    /// Value moved into the destination before the code ran
    pub value: u128,
    /// Opaque call payload
    pub input: Vec<u8>,
}

/// Destination code: the seam for anything a call can reach.
///
/// `Ok` carries returned bytes, `Err` carries the revert payload. A callee
/// receives the ledger itself and may re-enter other entry points.
pub trait Contract {
    fn call(&mut self, host: &mut HostLedger, ctx: CallContext) -> std::result::Result<Vec<u8>, Vec<u8>>;
}

/// Snapshot of the rollback-covered ledger state.
///
/// Covers balances and the journal; destination code that fails a call must
/// not rely on its own partial internal state surviving the revert.
struct Snapshot {
    balances: HashMap<Address, u128>,
    journal_len: usize,
}

/// The Custos host ledger
#[derive(Default)]
pub struct HostLedger {
    /// Per-address balances
    balances: HashMap<Address, u128>,
    /// All entries (append-only)
    journal: Vec<JournalEntry>,
    /// Registered destination code
    contracts: HashMap<Address, Box<dyn Contract>>,
}

impl HostLedger {
    /// Create a new in-memory host ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, addr: &Address) -> u128 {
        self.balances.get(addr).copied().unwrap_or(0)
    }

    /// Register destination code at an address
    pub fn register(&mut self, addr: Address, contract: Box<dyn Contract>) {
        self.contracts.insert(addr, contract);
    }

    /// External deposit — the unguarded receive-funds entry.
    pub fn deposit(&mut self, addr: Address, amount: u128) -> Result<u128> {
        self.credit(addr, amount, EntryReason::Deposit)
    }

    /// Credit an address (increase balance). Returns the new balance.
    pub fn credit(&mut self, addr: Address, amount: u128, reason: EntryReason) -> Result<u128> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let current = self.balance_of(&addr);
        let new_balance = current
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { amount })?;

        self.balances.insert(addr, new_balance);
        self.append_entry(addr, EntryDirection::Credit, amount, new_balance, reason);
        Ok(new_balance)
    }

    /// Debit an address (decrease balance). Returns the new balance.
    ///
    /// Fails if the balance would go negative.
    pub fn debit(&mut self, addr: Address, amount: u128, reason: EntryReason) -> Result<u128> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let current = self.balance_of(&addr);
        let new_balance = current
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                available: current,
                required: amount,
            })?;

        self.balances.insert(addr, new_balance);
        self.append_entry(addr, EntryDirection::Debit, amount, new_balance, reason);
        Ok(new_balance)
    }

    /// Move `amount` from one address to another. Both sides journaled.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
        reason: EntryReason,
    ) -> Result<()> {
        // Prove the credit side cannot overflow before touching the debit
        // side, so a failed transfer leaves both balances untouched.
        self.balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { amount })?;
        self.debit(from, amount, reason.clone())?;
        self.credit(to, amount, reason)?;
        Ok(())
    }

    /// The generic call primitive: move `value`, then run destination code.
    ///
    /// A destination with no registered code is a plain transfer. Any
    /// failure — value move or callee revert — restores balances and journal
    /// to the pre-call state and reports `success: false` with the revert
    /// payload in `data`.
    pub fn call(
        &mut self,
        caller: Address,
        dest: Address,
        value: u128,
        payload: &[u8],
    ) -> CallResult {
        let snapshot = self.snapshot();
        debug!(%caller, %dest, value, payload_len = payload.len(), "host call");

        if value > 0 {
            if let Err(e) = self.transfer(caller, dest, value, EntryReason::CallValue { caller }) {
                debug!(%caller, %dest, error = %e, "call value move failed");
                return CallResult::reverted(e.to_string().into_bytes());
            }
        }

        // Detach the callee for the duration of the call so it can receive
        // `&mut HostLedger` without aliasing the registry slot it lives in.
        match self.contracts.remove(&dest) {
            None => CallResult::ok(Vec::new()),
            Some(mut contract) => {
                let ctx = CallContext { caller, value, input: payload.to_vec() };
                let outcome = contract.call(self, ctx);
                self.contracts.insert(dest, contract);
                match outcome {
                    Ok(data) => CallResult::ok(data),
                    Err(revert) => {
                        self.restore(snapshot);
                        debug!(%dest, revert_len = revert.len(), "call reverted");
                        CallResult::reverted(revert)
                    }
                }
            }
        }
    }

    /// Run a closure against the ledger, restoring the pre-closure snapshot
    /// if it returns `Err`. This is the host-provided invocation atomicity:
    /// an aborted invocation leaves no partial effects.
    pub fn atomic<T, E>(
        &mut self,
        f: impl FnOnce(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let snapshot = self.snapshot();
        let result = f(self);
        if result.is_err() {
            self.restore(snapshot);
        }
        result
    }

    /// All journal entries, oldest first
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Journal entries touching one address
    pub fn entries_for(&self, addr: &Address) -> Vec<JournalEntry> {
        self.journal
            .iter()
            .filter(|e| &e.account == addr)
            .cloned()
            .collect()
    }

    fn append_entry(
        &mut self,
        account: Address,
        direction: EntryDirection,
        amount: u128,
        balance_after: u128,
        reason: EntryReason,
    ) {
        trace!(%account, ?direction, amount, balance_after, "journal entry");
        self.journal.push(JournalEntry {
            entry_id: EntryId::new(),
            account,
            direction,
            amount,
            balance_after,
            reason,
            created_at: Utc::now(),
        });
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            balances: self.balances.clone(),
            journal_len: self.journal.len(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.balances = snapshot.balances;
        self.journal.truncate(snapshot.journal_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    /// Callee that records what it saw and returns fixed bytes.
    struct Recorder {
        seen: Vec<(Address, u128, Vec<u8>)>,
    }

    impl Contract for Recorder {
        fn call(
            &mut self,
            _host: &mut HostLedger,
            ctx: CallContext,
        ) -> std::result::Result<Vec<u8>, Vec<u8>> {
            self.seen.push((ctx.caller, ctx.value, ctx.input));
            Ok(b"recorded".to_vec())
        }
    }

    /// Callee that always reverts with a fixed payload.
    struct Reverter;

    impl Contract for Reverter {
        fn call(
            &mut self,
            _host: &mut HostLedger,
            _ctx: CallContext,
        ) -> std::result::Result<Vec<u8>, Vec<u8>> {
            Err(b"always reverts".to_vec())
        }
    }

    /// Callee that forwards half its received value onward via a nested call.
    struct Forwarder {
        next: Address,
    }

    impl Contract for Forwarder {
        fn call(
            &mut self,
            host: &mut HostLedger,
            ctx: CallContext,
        ) -> std::result::Result<Vec<u8>, Vec<u8>> {
            let self_addr = ctx.input.first().map(|b| addr(*b)).unwrap_or(Address::ZERO);
            let result = host.call(self_addr, self.next, ctx.value / 2, &[]);
            if result.success {
                Ok(Vec::new())
            } else {
                Err(result.data)
            }
        }
    }

    #[test]
    fn deposit_and_balance() {
        let mut host = HostLedger::new();
        assert_eq!(host.balance_of(&addr(1)), 0);

        let balance = host.deposit(addr(1), 1000).unwrap();
        assert_eq!(balance, 1000);
        assert_eq!(host.balance_of(&addr(1)), 1000);
    }

    #[test]
    fn zero_deposit_rejected() {
        let mut host = HostLedger::new();
        assert!(matches!(host.deposit(addr(1), 0), Err(LedgerError::ZeroAmount)));
    }

    #[test]
    fn no_negative_balance() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 100).unwrap();

        let result = host.debit(addr(1), 200, EntryReason::Deposit);
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(host.balance_of(&addr(1)), 100, "failed debit must not move funds");
    }

    #[test]
    fn credit_overflow_rejected() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), u128::MAX).unwrap();
        let result = host.credit(addr(1), 1, EntryReason::Deposit);
        assert!(matches!(result, Err(LedgerError::BalanceOverflow { .. })));
    }

    #[test]
    fn transfer_moves_funds() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 1000).unwrap();

        host.transfer(addr(1), addr(2), 400, EntryReason::Deposit).unwrap();
        assert_eq!(host.balance_of(&addr(1)), 600);
        assert_eq!(host.balance_of(&addr(2)), 400);
    }

    #[test]
    fn call_to_bare_address_is_plain_transfer() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 500).unwrap();

        let result = host.call(addr(1), addr(2), 200, &[]);
        assert!(result.success);
        assert!(result.data.is_empty());
        assert_eq!(host.balance_of(&addr(2)), 200);
    }

    #[test]
    fn call_runs_registered_code() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 500).unwrap();
        host.register(addr(9), Box::new(Recorder { seen: Vec::new() }));

        let result = host.call(addr(1), addr(9), 100, b"payload");
        assert!(result.success);
        assert_eq!(result.data, b"recorded");
        assert_eq!(host.balance_of(&addr(9)), 100);
    }

    #[test]
    fn call_with_insufficient_value_fails_cleanly() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 50).unwrap();

        let result = host.call(addr(1), addr(2), 100, &[]);
        assert!(!result.success);
        assert_eq!(host.balance_of(&addr(1)), 50);
        assert_eq!(host.balance_of(&addr(2)), 0);
    }

    #[test]
    fn reverted_call_rolls_back_balances_and_journal() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 500).unwrap();
        host.register(addr(9), Box::new(Reverter));
        let journal_before = host.journal().len();

        let result = host.call(addr(1), addr(9), 100, &[]);
        assert!(!result.success);
        assert_eq!(result.data, b"always reverts", "revert payload must surface");
        assert_eq!(host.balance_of(&addr(1)), 500, "value move must be unwound");
        assert_eq!(host.balance_of(&addr(9)), 0);
        assert_eq!(host.journal().len(), journal_before, "journal must be unwound");
    }

    #[test]
    fn nested_call_from_destination_code() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 1000).unwrap();
        host.register(addr(7), Box::new(Forwarder { next: addr(8) }));

        let result = host.call(addr(1), addr(7), 600, &[7]);
        assert!(result.success);
        assert_eq!(host.balance_of(&addr(7)), 300);
        assert_eq!(host.balance_of(&addr(8)), 300);
    }

    #[test]
    fn atomic_restores_on_err() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 100).unwrap();

        let result: std::result::Result<(), &str> = host.atomic(|h| {
            h.transfer(addr(1), addr(2), 60, EntryReason::Deposit).unwrap();
            Err("abort")
        });
        assert!(result.is_err());
        assert_eq!(host.balance_of(&addr(1)), 100, "aborted invocation leaves no effects");
        assert_eq!(host.balance_of(&addr(2)), 0);
    }

    #[test]
    fn atomic_keeps_effects_on_ok() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 100).unwrap();

        let result: std::result::Result<(), &str> = host.atomic(|h| {
            h.transfer(addr(1), addr(2), 60, EntryReason::Deposit).unwrap();
            Ok(())
        });
        assert!(result.is_ok());
        assert_eq!(host.balance_of(&addr(2)), 60);
    }

    #[test]
    fn journal_entry_serializes() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 10).unwrap();

        let json = serde_json::to_string(&host.journal()[0]).unwrap();
        assert!(json.contains("Credit"));
        assert!(json.contains("Deposit"));
    }

    #[test]
    fn journal_records_balance_after_and_reason() {
        let mut host = HostLedger::new();
        host.deposit(addr(1), 100).unwrap();
        host.transfer(addr(1), addr(2), 30, EntryReason::Prefund { relay: addr(2) }).unwrap();

        let entries = host.entries_for(&addr(1));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].direction, EntryDirection::Debit);
        assert_eq!(entries[1].amount, 30);
        assert_eq!(entries[1].balance_after, 70);
        assert!(matches!(entries[1].reason, EntryReason::Prefund { .. }));
    }
}

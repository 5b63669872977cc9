//! Custos Demo - the relay scenario, end to end
//!
//! Wires a funded smart account, an owner wallet, and a trusted operator
//! together on an in-memory host ledger, then walks the full flow:
//!
//! 1. the operator submits an owner-signed operation for validation and is
//!    reimbursed its prefund;
//! 2. a stranger's `execute` is refused by the authorization gateway;
//! 3. the operator dispatches the validated operation.
//!
//! # Quick Start
//!
//! ```bash
//! # Run with defaults
//! custos-demo
//!
//! # Larger prefund, more initial funding
//! custos-demo --missing-funds 25 --fund 10000
//!
//! # Verbose core logs
//! RUST_LOG=debug custos-demo
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use custos_account::{AccountError, SmartAccount};
use custos_crypto::{keccak_all, OwnerWallet};
use custos_host::HostLedger;
use custos_types::{OpDigest, Operation};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Custos Demo - smart-account relay scenario
#[derive(Parser, Debug)]
#[command(
    name = "custos-demo",
    about = "Run the Custos smart-account relay scenario on an in-memory host ledger",
    version
)]
struct Args {
    /// Prefund the relay claims for the validation submission
    #[arg(long, default_value = "5")]
    missing_funds: u128,

    /// Initial deposit into the account
    #[arg(long, default_value = "1000")]
    fund: u128,

    /// Value the validated operation carries to its destination
    #[arg(long, default_value = "100")]
    op_value: u128,
}

/// Digest an operation the way the relay infrastructure would: a keccak
/// over its encoded fields. The core never recomputes this — it validates
/// whatever digest the submitter hands over.
fn digest_of(op: &Operation) -> OpDigest {
    OpDigest::from_bytes(keccak_all(&[
        op.dest.as_bytes(),
        &op.value.to_be_bytes(),
        &op.payload,
    ]))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Identities: owner wallet, operator relay, destination, and a stranger.
    let owner = OwnerWallet::for_label("demo-owner");
    let operator = OwnerWallet::for_label("demo-relay").address();
    let destination = OwnerWallet::for_label("demo-destination").address();
    let stranger = OwnerWallet::for_label("demo-stranger").address();
    let account_address = OwnerWallet::for_label("demo-account").address();

    let account = SmartAccount::new(account_address, owner.address(), operator);
    let mut host = HostLedger::new();
    host.deposit(account.address(), args.fund)
        .context("funding the account")?;

    info!(account = %account.address(), owner = %owner.address(), operator = %operator, "scenario wired");

    // 1. The operator submits an owner-signed operation for validation.
    let mut op = Operation {
        dest: destination,
        value: args.op_value,
        payload: b"demo payload".to_vec(),
        signature: Vec::new(),
    };
    let digest = digest_of(&op);
    op.signature = owner.sign_digest(&digest)?.to_vec();

    let outcome = account.validate_operation(&mut host, operator, &op, digest, args.missing_funds)?;
    info!(%outcome, relay_balance = host.balance_of(&operator), "validation settled");
    if !outcome.is_accepted() {
        bail!("owner-signed operation was rejected");
    }

    // 2. A stranger's execute is refused by the gateway.
    match account.execute(&mut host, stranger, destination, args.op_value, &op.payload) {
        Err(AccountError::NotFromOperatorOrOwner { caller }) => {
            info!(%caller, "stranger refused by the authorization gateway");
        }
        other => bail!("expected the gateway to refuse the stranger, got {other:?}"),
    }

    // 3. The operator dispatches the validated operation.
    account.execute(&mut host, operator, op.dest, op.value, &op.payload)?;
    info!(
        account_balance = host.balance_of(&account.address()),
        destination_balance = host.balance_of(&destination),
        "operation dispatched"
    );

    println!("journal:");
    for entry in host.journal() {
        println!(
            "  {:?} {} {} -> balance {} ({:?})",
            entry.direction, entry.amount, entry.account, entry.balance_after, entry.reason
        );
    }

    Ok(())
}

//! Custos Types - Canonical domain types for the smart-account core
//!
//! This crate contains the foundational types for Custos with zero
//! dependencies on other custos crates:
//!
//! - Identity types (`Address`, `OpDigest`)
//! - Operation and call types (`Operation`, `CallResult`)
//! - Validation outcome types (`ValidationOutcome`)
//!
//! # Architectural Invariants
//!
//! 1. The operator identity of an account is fixed at construction
//! 2. Validation is binary — `Accepted` or `Rejected`, never a third state
//! 3. Operations are transient: consumed once per validation attempt,
//!    never persisted by the core

pub mod address;
pub mod digest;
pub mod operation;
pub mod outcome;

pub use address::*;
pub use digest::*;
pub use operation::*;
pub use outcome::*;

/// Version of the Custos types schema
pub const TYPES_VERSION: &str = "0.1.0";

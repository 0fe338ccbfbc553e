//! # escrow-core — Foundational Types for the Escrow Ledger
//!
//! Defines the primitive types shared by the escrow crates. Nothing in this
//! crate knows about deposits or releases; it only supplies the vocabulary:
//!
//! - **Identity** (`identity.rs`): `PartyId` and `EscrowId`, UUID-backed
//!   newtypes. No bare strings for identifiers — you cannot pass a
//!   `PartyId` where an `EscrowId` is expected.
//!
//! - **Amount** (`amount.rs`): `Amount`, an unsigned integer amount in
//!   smallest currency units with checked arithmetic.
//!
//! - **Temporal** (`temporal.rs`): `Timestamp`, UTC-only with seconds
//!   precision and ISO 8601 `Z`-suffix rendering.
//!
//! ## Crate Policy
//!
//! - No dependencies on other escrow crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod amount;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::Amount;
pub use identity::{EscrowId, PartyId};
pub use temporal::Timestamp;

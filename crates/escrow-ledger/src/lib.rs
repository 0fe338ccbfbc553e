//! # escrow-ledger — Tri-Party Escrow State Machine
//!
//! A single-instance escrow between three fixed parties:
//!
//! - the **payer** funds the ledger via `deposit`,
//! - the **arbiter** (lawyer) authorizes `release` once the balance meets
//!   the funding target,
//! - the **payee** receives the released balance.
//!
//! ## Modules
//!
//! - **Ledger** (`ledger.rs`): the `EscrowLedger` state machine with its
//!   role-gated operations, derived phase, error taxonomy, and append-only
//!   entry log.
//!
//! - **Holdings** (`holdings.rs`): external account balances credited from
//!   release payouts, for observing where released funds land.
//!
//! ## Phases
//!
//! ```text
//! Empty ──deposit──▶ PartiallyFunded ──deposit──▶ Funded ──release──▶ Released
//! ```
//!
//! The phase is derived from the balance and release record, never stored;
//! `Released` is sticky — there is no transition back.

pub mod holdings;
pub mod ledger;

pub use holdings::Holdings;
pub use ledger::{EntryKind, EscrowError, EscrowLedger, EscrowPhase, LedgerEntry, Payout};

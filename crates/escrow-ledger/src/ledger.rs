//! # Escrow Ledger State Machine
//!
//! A ledger holding funds between three fixed parties. The payer funds it,
//! the arbiter releases it, the payee receives it. Guards are flat identity
//! comparisons against the parties fixed at deployment — there is no role
//! hierarchy and no dynamic dispatch.
//!
//! ## Security Invariant
//!
//! Every operation validates its caller before touching the balance, and a
//! rejected call leaves the ledger unchanged. Successful operations append
//! exactly one entry to the audit log.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use escrow_core::{Amount, EscrowId, PartyId, Timestamp};

// ── Errors ─────────────────────────────────────────────────────────────

/// Errors arising from escrow ledger operations.
///
/// The `Display` strings are the ledger's fixed rejection messages and are
/// part of its public contract; callers matching on failure conditions
/// should use the variants, which carry the caller/amount context as
/// structured fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscrowError {
    /// Deposit attempted by a party other than the payer.
    #[error("Only Payer can deposit the funds")]
    UnauthorizedDepositor {
        /// The party that attempted the deposit.
        caller: PartyId,
    },

    /// A single deposit exceeding the funding target.
    #[error("Cant send more than escrow amount")]
    ExceedsTarget {
        /// The rejected deposit amount.
        amount: Amount,
        /// The funding target it was checked against.
        target: Amount,
    },

    /// Release attempted before the balance reached the target.
    #[error("Insufficient funds for release")]
    InsufficientFunds {
        /// The balance at the time of the attempt.
        balance: Amount,
        /// The funding target.
        target: Amount,
    },

    /// Release attempted by a party other than the arbiter.
    #[error("only Lawyer can release the funds")]
    UnauthorizedReleaser {
        /// The party that attempted the release.
        caller: PartyId,
    },

    /// Deposit would overflow the ledger balance.
    #[error("deposit would overflow the ledger balance")]
    BalanceOverflow,
}

// ── Phase ──────────────────────────────────────────────────────────────

/// The funding phase of an escrow ledger.
///
/// Derived from the balance and release record — never stored, so it can
/// never disagree with the ledger state. The progression is linear:
/// `Empty → PartiallyFunded → Funded → Released`, and `Released` is sticky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowPhase {
    /// No funds deposited yet.
    Empty,
    /// Funded below the target.
    PartiallyFunded,
    /// Balance has met the target; release is possible.
    Funded,
    /// Funds have been released to the payee (terminal).
    Released,
}

impl EscrowPhase {
    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released)
    }

    /// The canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::PartiallyFunded => "PARTIALLY_FUNDED",
            Self::Funded => "FUNDED",
            Self::Released => "RELEASED",
        }
    }
}

impl std::fmt::Display for EscrowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Ledger Entries ─────────────────────────────────────────────────────

/// Types of ledger entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Funds deposited by the payer.
    Deposit,
    /// Entire balance released to the payee.
    Release,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Deposit => "deposit",
            Self::Release => "release",
        };
        f.write_str(s)
    }
}

/// A recorded ledger operation.
///
/// Only successful operations are recorded; rejected calls leave no trace
/// in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry type.
    pub kind: EntryKind,
    /// Amount moved by the operation.
    pub amount: Amount,
    /// When the operation occurred.
    pub timestamp: Timestamp,
}

// ── Payout ─────────────────────────────────────────────────────────────

/// Receipt for a completed release.
///
/// Returned by [`EscrowLedger::release`]; apply it to a
/// [`Holdings`](crate::Holdings) view to credit the payee's external
/// account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// The party the funds were released to.
    pub payee: PartyId,
    /// The full balance that was released.
    pub amount: Amount,
    /// When the release occurred.
    pub released_at: Timestamp,
}

// ── Escrow Ledger ──────────────────────────────────────────────────────

/// A tri-party escrow ledger.
///
/// Created once via [`EscrowLedger::deploy`] with three fixed identities
/// and a fixed funding target. The balance starts at zero, grows only
/// through payer deposits, and is zeroed by an arbiter release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscrowLedger {
    /// Unique ledger identifier.
    pub id: EscrowId,
    /// Party authorized to release the balance.
    pub arbiter: PartyId,
    /// Sole party authorized to deposit.
    pub payer: PartyId,
    /// Recipient of released funds.
    pub payee: PartyId,
    /// The fixed funding goal.
    pub target: Amount,
    /// Funds currently held.
    balance: Amount,
    /// Set by the first successful release.
    released_at: Option<Timestamp>,
    /// Append-only log of successful operations.
    pub entries: Vec<LedgerEntry>,
    /// When the ledger was deployed.
    pub created_at: Timestamp,
}

impl EscrowLedger {
    /// Deploy a new escrow ledger.
    ///
    /// The deploying caller becomes the arbiter. Identities and target are
    /// fixed for the lifetime of the ledger, and the balance starts at
    /// zero. Deployment itself cannot fail: duplicate identities and a
    /// zero target are accepted, and the guards below simply behave
    /// accordingly.
    pub fn deploy(arbiter: PartyId, payer: PartyId, payee: PartyId, target: Amount) -> Self {
        let ledger = Self {
            id: EscrowId::new(),
            arbiter,
            payer,
            payee,
            target,
            balance: Amount::ZERO,
            released_at: None,
            entries: Vec::new(),
            created_at: Timestamp::now(),
        };
        debug!(escrow = %ledger.id, target_amount = %ledger.target, "escrow ledger deployed");
        ledger
    }

    /// Deposit funds into the ledger.
    ///
    /// Only the payer may deposit, and a single call may not exceed the
    /// funding target. The bound is per call, not cumulative: repeated
    /// deposits can carry the balance past the target.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::UnauthorizedDepositor`] if `caller` is not the payer.
    /// - [`EscrowError::ExceedsTarget`] if `amount` exceeds the target.
    /// - [`EscrowError::BalanceOverflow`] if the balance would overflow.
    pub fn deposit(&mut self, caller: &PartyId, amount: Amount) -> Result<(), EscrowError> {
        if *caller != self.payer {
            warn!(escrow = %self.id, %caller, "deposit rejected: caller is not the payer");
            return Err(EscrowError::UnauthorizedDepositor { caller: *caller });
        }
        if amount > self.target {
            warn!(escrow = %self.id, %amount, target_amount = %self.target, "deposit rejected: amount exceeds target");
            return Err(EscrowError::ExceedsTarget {
                amount,
                target: self.target,
            });
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(EscrowError::BalanceOverflow)?;
        self.balance = balance;
        self.entries.push(LedgerEntry {
            kind: EntryKind::Deposit,
            amount,
            timestamp: Timestamp::now(),
        });
        debug!(escrow = %self.id, %amount, %balance, "deposit accepted");
        Ok(())
    }

    /// Release the entire balance to the payee.
    ///
    /// Only the arbiter may release, and only once the balance has met the
    /// target. Authorization is checked before the funding condition.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::UnauthorizedReleaser`] if `caller` is not the arbiter.
    /// - [`EscrowError::InsufficientFunds`] if the balance is below the target.
    pub fn release(&mut self, caller: &PartyId) -> Result<Payout, EscrowError> {
        if *caller != self.arbiter {
            warn!(escrow = %self.id, %caller, "release rejected: caller is not the arbiter");
            return Err(EscrowError::UnauthorizedReleaser { caller: *caller });
        }
        if self.balance < self.target {
            warn!(escrow = %self.id, balance = %self.balance, target_amount = %self.target, "release rejected: balance below target");
            return Err(EscrowError::InsufficientFunds {
                balance: self.balance,
                target: self.target,
            });
        }
        let released_at = Timestamp::now();
        let amount = self.balance;
        self.balance = Amount::ZERO;
        self.released_at.get_or_insert(released_at);
        self.entries.push(LedgerEntry {
            kind: EntryKind::Release,
            amount,
            timestamp: released_at,
        });
        debug!(escrow = %self.id, %amount, payee = %self.payee, "balance released to payee");
        Ok(Payout {
            payee: self.payee,
            amount,
            released_at,
        })
    }

    /// The funds currently held. Read-only, callable by anyone.
    pub fn balance_of(&self) -> Amount {
        self.balance
    }

    /// The current funding phase, derived from the ledger state.
    pub fn phase(&self) -> EscrowPhase {
        if self.released_at.is_some() {
            EscrowPhase::Released
        } else if self.balance.is_zero() {
            EscrowPhase::Empty
        } else if self.balance >= self.target {
            EscrowPhase::Funded
        } else {
            EscrowPhase::PartiallyFunded
        }
    }

    /// When the balance was first released, if it has been.
    pub fn released_at(&self) -> Option<Timestamp> {
        self.released_at
    }
}

//! # External Holdings
//!
//! Balances held by parties outside the escrow. The ledger itself only
//! knows what it holds; where a release lands is observed by crediting the
//! [`Payout`] receipt to a `Holdings` view, the way an external account
//! book would.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use escrow_core::{Amount, PartyId};

use crate::ledger::{EscrowError, Payout};

/// External account balances, keyed by party.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Holdings {
    accounts: HashMap<PartyId, Amount>,
}

impl Holdings {
    /// An empty holdings view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a release payout to the payee's account.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::BalanceOverflow`] if the payee's holdings
    /// would overflow.
    pub fn credit(&mut self, payout: &Payout) -> Result<(), EscrowError> {
        let current = self.balance_of(&payout.payee);
        let updated = current
            .checked_add(payout.amount)
            .ok_or(EscrowError::BalanceOverflow)?;
        self.accounts.insert(payout.payee, updated);
        Ok(())
    }

    /// The holdings of a party. Unknown parties hold zero.
    pub fn balance_of(&self, party: &PartyId) -> Amount {
        self.accounts.get(party).copied().unwrap_or(Amount::ZERO)
    }
}

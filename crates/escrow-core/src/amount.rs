//! # Monetary Amounts
//!
//! `Amount` is an unsigned integer amount in smallest currency units
//! (cents/wei/paise). Negative amounts cannot be constructed, and all
//! arithmetic is checked — a sum that would wrap returns `None` instead
//! of corrupting a balance.

use serde::{Deserialize, Serialize};

/// An unsigned monetary amount in smallest currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a count of smallest currency units.
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// The raw unit count.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on u64 overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction. Returns `None` if `other` exceeds `self`.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

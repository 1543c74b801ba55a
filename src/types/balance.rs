//! Custodied balance of one owner in one asset.

/// Available/reserved split of an owner's custody in one asset.
///
/// `available` is what the owner may withdraw or commit to new orders;
/// `reserved` backs exactly the unfilled remainder of the owner's resting
/// orders. Both fields are unsigned by construction, and their sum only
/// changes through deposits, withdrawals, or trade settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Balance {
    /// Withdrawable, committable funds
    pub available: u64,

    /// Funds earmarked for resting orders
    pub reserved: u64,
}

impl Balance {
    /// Total custodied amount (available + reserved)
    pub fn total(&self) -> u64 {
        self.available + self.reserved
    }
}

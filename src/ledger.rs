//! Balance ledger: available/reserved custody per (asset, owner).
//!
//! ## Invariant
//!
//! For every owner and asset, `reserved` equals the sum of that owner's
//! resting order commitments. The ledger maintains this incrementally -
//! reserve on placement, release on cancellation, settle on fills - and
//! never recomputes it by scanning the book.
//!
//! Settlement moves funds straight from the payer's reserved bucket into
//! the counterparty's available bucket; reserved funds never pass back
//! through the payer's own available balance.

use std::collections::HashMap;

use crate::error::ExchangeError;
use crate::types::{AssetId, Balance, OwnerId};

/// Tracks available and reserved balances for every (asset, owner) pair.
///
/// Absent entries read as a zero balance.
///
/// ## Example
///
/// ```
/// use chainbook::ledger::BalanceLedger;
///
/// let mut ledger = BalanceLedger::new();
/// ledger.deposit(0, 7, 500);
/// ledger.reserve(0, 7, 200).unwrap();
///
/// let balance = ledger.balance(0, 7);
/// assert_eq!(balance.available, 300);
/// assert_eq!(balance.reserved, 200);
/// ```
#[derive(Debug, Default)]
pub struct BalanceLedger {
    accounts: HashMap<(AssetId, OwnerId), Balance>,
}

impl BalanceLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the balance of an owner in an asset (zero if never touched)
    pub fn balance(&self, asset: AssetId, owner: OwnerId) -> Balance {
        self.accounts.get(&(asset, owner)).copied().unwrap_or_default()
    }

    /// Credit the available balance
    pub fn deposit(&mut self, asset: AssetId, owner: OwnerId, amount: u64) {
        let entry = self.accounts.entry((asset, owner)).or_default();
        entry.available = entry.available.saturating_add(amount);
    }

    /// Debit the available balance
    ///
    /// Fails with `InsufficientFunds` when `available < amount`; the caller
    /// routes the debited funds out through the asset vault.
    pub fn withdraw(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        let entry = self.accounts.entry((asset, owner)).or_default();
        if entry.available < amount {
            return Err(ExchangeError::InsufficientFunds {
                required: amount,
                available: entry.available,
            });
        }
        entry.available -= amount;
        Ok(())
    }

    /// Move funds from available to reserved, backing a new resting order
    pub fn reserve(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        let entry = self.accounts.entry((asset, owner)).or_default();
        if entry.available < amount {
            return Err(ExchangeError::InsufficientFunds {
                required: amount,
                available: entry.available,
            });
        }
        entry.available -= amount;
        entry.reserved += amount;
        Ok(())
    }

    /// Move funds back from reserved to available (cancellation, or the
    /// aggressor's price-improvement excess on a fill)
    pub fn release(&mut self, asset: AssetId, owner: OwnerId, amount: u64) {
        let entry = self.accounts.entry((asset, owner)).or_default();
        entry.reserved = entry.reserved.saturating_sub(amount);
        entry.available = entry.available.saturating_add(amount);
    }

    /// Settle a fill: `amount` leaves `from`'s reserved bucket and lands in
    /// `to`'s available bucket
    pub fn settle(&mut self, asset: AssetId, from: OwnerId, to: OwnerId, amount: u64) {
        {
            let payer = self.accounts.entry((asset, from)).or_default();
            payer.reserved = payer.reserved.saturating_sub(amount);
        }
        let payee = self.accounts.entry((asset, to)).or_default();
        payee.available = payee.available.saturating_add(amount);
    }

    /// Iterate all (asset, owner, balance) entries, unordered
    pub fn entries(&self) -> impl Iterator<Item = (AssetId, OwnerId, Balance)> + '_ {
        self.accounts.iter().map(|(&(asset, owner), &balance)| (asset, owner, balance))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

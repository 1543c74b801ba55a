//! External asset-transfer collaborator.
//!
//! Token transfer semantics (approve/transfer/balance) live outside the
//! exchange core. The core only needs three calls: pull funds in on token
//! deposit, push funds out on withdrawal, and a read-only balance view for
//! diagnostics. [`MockVault`] is the in-memory double used by the tests and
//! the demo binary.

use std::collections::HashMap;

use crate::error::ExchangeError;
use crate::types::{AssetId, OwnerId};

/// Interface to the external asset-transfer mechanism.
///
/// `transfer_in` corresponds to pulling approved funds from the owner into
/// exchange custody and fails with `InsufficientAllowance` when the owner
/// has not approved enough. `transfer_out` pushes custody back to the owner.
/// `balance_of` is diagnostic only and never drives reservation decisions.
pub trait AssetVault {
    /// Debit the owner's external balance; fails if the allowance is too low
    fn transfer_in(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError>;

    /// Credit the owner's external balance
    fn transfer_out(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError>;

    /// Read the owner's external balance (diagnostics only)
    fn balance_of(&self, asset: AssetId, owner: OwnerId) -> u64;
}

/// In-memory vault with explicit balances and allowances.
///
/// ## Example
///
/// ```
/// use chainbook::vault::{AssetVault, MockVault};
///
/// let mut vault = MockVault::new();
/// vault.set_balance(9, 7, 1000);
/// vault.approve(9, 7, 1000);
///
/// vault.transfer_in(9, 7, 400).unwrap();
/// assert_eq!(vault.balance_of(9, 7), 600);
/// ```
#[derive(Debug, Default)]
pub struct MockVault {
    balances: HashMap<(AssetId, OwnerId), u64>,
    allowances: HashMap<(AssetId, OwnerId), u64>,
}

impl MockVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an owner's external balance outright (test setup)
    pub fn set_balance(&mut self, asset: AssetId, owner: OwnerId, amount: u64) {
        self.balances.insert((asset, owner), amount);
    }

    /// Approve the exchange to pull up to `amount` from the owner
    pub fn approve(&mut self, asset: AssetId, owner: OwnerId, amount: u64) {
        self.allowances.insert((asset, owner), amount);
    }
}

impl AssetVault for MockVault {
    fn transfer_in(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        let allowance = self.allowances.entry((asset, owner)).or_default();
        let balance = self.balances.entry((asset, owner)).or_default();
        if *allowance < amount || *balance < amount {
            return Err(ExchangeError::InsufficientAllowance { asset });
        }
        *allowance -= amount;
        *balance -= amount;
        Ok(())
    }

    fn transfer_out(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        let balance = self.balances.entry((asset, owner)).or_default();
        *balance = balance.saturating_add(amount);
        Ok(())
    }

    fn balance_of(&self, asset: AssetId, owner: OwnerId) -> u64 {
        self.balances.get(&(asset, owner)).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_in_requires_allowance() {
        let mut vault = MockVault::new();
        vault.set_balance(9, 7, 1000);

        // No approval yet
        let err = vault.transfer_in(9, 7, 100).unwrap_err();
        assert_eq!(err, ExchangeError::InsufficientAllowance { asset: 9 });

        vault.approve(9, 7, 100);
        vault.transfer_in(9, 7, 100).unwrap();
        assert_eq!(vault.balance_of(9, 7), 900);
    }

    #[test]
    fn test_transfer_in_consumes_allowance() {
        let mut vault = MockVault::new();
        vault.set_balance(9, 7, 1000);
        vault.approve(9, 7, 150);

        vault.transfer_in(9, 7, 100).unwrap();
        assert!(vault.transfer_in(9, 7, 100).is_err());
    }

    #[test]
    fn test_transfer_out_credits() {
        let mut vault = MockVault::new();
        vault.transfer_out(9, 7, 250).unwrap();
        assert_eq!(vault.balance_of(9, 7), 250);
    }
}

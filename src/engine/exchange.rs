//! The exchange: funds surface, matching loop, cancellation, queries.
//!
//! One [`Exchange`] instance owns all mutable state - the balance ledger,
//! one order book per traded asset, the outbound event queue, and a handle
//! to the external asset vault. Every mutating call takes `&mut self` and
//! runs to completion: there is no concurrent mutation and no suspension
//! point inside a placement or cancellation.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::error::ExchangeError;
use crate::events::Event;
use crate::ledger::BalanceLedger;
use crate::orderbook::{BookInfo, OrderBook, OrderInfo};
use crate::types::{AssetId, Balance, Order, OwnerId, Side, Trade, NATIVE_ASSET};
use crate::vault::AssetVault;

/// On-ledger token exchange.
///
/// Buys pay the native asset (id 0) for tokens; sells pay tokens for the
/// native asset. Placement reserves the full notional up front, matching
/// executes at resting prices and settles reserved funds directly into the
/// counterparty's available balance, and remainders rest in the book.
///
/// ## Example
///
/// ```
/// use chainbook::{Exchange, MockVault, Side};
///
/// let mut exchange = Exchange::new(MockVault::new());
/// exchange.deposit(1, 1_000).unwrap();
///
/// let id = exchange.buy(9, 1, 5, 100).unwrap();
/// assert_eq!(id, 1);
///
/// let balance = exchange.get_balance(0, 1);
/// assert_eq!(balance.available, 500);
/// assert_eq!(balance.reserved, 500);
/// ```
#[derive(Debug)]
pub struct Exchange<V: AssetVault> {
    vault: V,
    ledger: BalanceLedger,
    books: HashMap<AssetId, OrderBook>,
    events: Vec<Event>,
}

impl<V: AssetVault> Exchange<V> {
    /// Create an exchange backed by the given asset vault
    pub fn new(vault: V) -> Self {
        Self {
            vault,
            ledger: BalanceLedger::new(),
            books: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Access the vault (diagnostics and test setup)
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Mutable access to the vault (test setup)
    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    // ========================================================================
    // Funds management
    // ========================================================================

    /// Deposit the native asset. The value accompanies the call, so the
    /// only failure is a zero amount.
    pub fn deposit(&mut self, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        if amount == 0 {
            return Err(ExchangeError::ZeroAmount);
        }
        self.ledger.deposit(NATIVE_ASSET, owner, amount);
        Ok(())
    }

    /// Withdraw the native asset through the vault
    pub fn withdraw(&mut self, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        self.withdraw_asset(NATIVE_ASSET, owner, amount)
    }

    /// Deposit a token: pulls approved funds through the vault, then
    /// credits the ledger
    pub fn deposit_token(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        if asset == NATIVE_ASSET {
            return Err(ExchangeError::InvalidAsset { asset });
        }
        if amount == 0 {
            return Err(ExchangeError::ZeroAmount);
        }
        self.vault.transfer_in(asset, owner, amount)?;
        self.ledger.deposit(asset, owner, amount);
        Ok(())
    }

    /// Withdraw a token through the vault
    pub fn withdraw_token(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        if asset == NATIVE_ASSET {
            return Err(ExchangeError::InvalidAsset { asset });
        }
        self.withdraw_asset(asset, owner, amount)
    }

    /// Shared withdrawal path: funds check, vault transfer, ledger debit.
    /// The vault call happens before the debit so a refusal leaves the
    /// ledger untouched.
    fn withdraw_asset(&mut self, asset: AssetId, owner: OwnerId, amount: u64) -> Result<(), ExchangeError> {
        if amount == 0 {
            return Err(ExchangeError::ZeroAmount);
        }
        let available = self.ledger.balance(asset, owner).available;
        if available < amount {
            return Err(ExchangeError::InsufficientFunds { required: amount, available });
        }
        self.vault.transfer_out(asset, owner, amount)?;
        self.ledger.withdraw(asset, owner, amount)
    }

    // ========================================================================
    // Order placement
    // ========================================================================

    /// Place a limit buy order; returns the order id
    pub fn buy(&mut self, asset: AssetId, owner: OwnerId, amount: u64, price: u64) -> Result<u64, ExchangeError> {
        self.place_order(asset, owner, Side::Buy, price, amount)
    }

    /// Place a limit sell order; returns the order id
    pub fn sell(&mut self, asset: AssetId, owner: OwnerId, amount: u64, price: u64) -> Result<u64, ExchangeError> {
        self.place_order(asset, owner, Side::Sell, price, amount)
    }

    /// Reserve, match against crossing resting orders (walking as many
    /// price levels as needed), rest the remainder, emit events.
    fn place_order(
        &mut self,
        asset: AssetId,
        owner: OwnerId,
        side: Side,
        price: u64,
        amount: u64,
    ) -> Result<u64, ExchangeError> {
        if asset == NATIVE_ASSET {
            return Err(ExchangeError::InvalidAsset { asset });
        }
        if price == 0 {
            return Err(ExchangeError::ZeroPrice);
        }
        if amount == 0 {
            return Err(ExchangeError::ZeroAmount);
        }

        // Reserve the full notional before touching the book. A failed
        // reservation aborts the whole call with no state change.
        let (reserve_asset, notional) = match side {
            Side::Buy => (
                NATIVE_ASSET,
                price.checked_mul(amount).ok_or(ExchangeError::Overflow)?,
            ),
            Side::Sell => (asset, amount),
        };
        self.ledger.reserve(reserve_asset, owner, notional)?;

        let book = self.books.entry(asset).or_default();
        let id = book.allocate_id();
        let mut remaining = amount;

        // Matching walk: consume the opposing best while it crosses. Each
        // iteration re-reads the best, so the walk crosses price levels
        // until liquidity runs out or the limit no longer crosses.
        while remaining > 0 {
            let best_key = match side {
                Side::Buy => book.best_ask_key(),
                Side::Sell => book.best_bid_key(),
            };
            let Some(best_key) = best_key else { break };
            let Some(resting) = book.node(best_key) else { break };
            let (resting_id, resting_owner, resting_price, resting_amount) =
                (resting.id(), resting.order.owner, resting.price(), resting.remaining());

            let crosses = match side {
                Side::Buy => price >= resting_price,
                Side::Sell => price <= resting_price,
            };
            if !crosses {
                break;
            }

            let fill = remaining.min(resting_amount);
            // Bounded by the buyer's reservation, which was checked
            let quote = resting_price * fill;

            let (buyer, seller, bid_id, ask_id) = match side {
                Side::Buy => (owner, resting_owner, id, resting_id),
                Side::Sell => (resting_owner, owner, resting_id, id),
            };

            // Native moves from the buyer's reservation to the seller;
            // the token moves from the seller's reservation to the buyer.
            self.ledger.settle(NATIVE_ASSET, buyer, seller, quote);
            self.ledger.settle(asset, seller, buyer, fill);

            // A buy aggressor reserved at its own limit but pays the
            // resting price; the difference for this fill goes back to
            // its available balance.
            if side == Side::Buy && price > resting_price {
                self.ledger.release(NATIVE_ASSET, owner, (price - resting_price) * fill);
            }

            remaining -= fill;
            let consumed = {
                let node = book.node_mut(best_key).expect("Invalid best key");
                node.fill(fill);
                node.is_filled()
            };
            if consumed {
                book.remove(best_key);
            }

            self.events
                .push(Event::Trade(Trade::new(asset, bid_id, ask_id, side, fill, resting_price)));
        }

        // Rest the remainder; a fully consumed aggressor never enters the
        // book and emits no NewOrder/NewBid/NewAsk.
        if remaining > 0 {
            let key = book.insert(Order::new(id, owner, side, price, remaining));
            self.events.push(Event::NewOrder {
                asset,
                owner,
                id,
                side,
                price,
                amount: remaining,
            });
            match side {
                Side::Buy if book.best_bid_key() == Some(key) => {
                    self.events.push(Event::NewBid { asset, price });
                }
                Side::Sell if book.best_ask_key() == Some(key) => {
                    self.events.push(Event::NewAsk { asset, price });
                }
                _ => {}
            }
        }

        Ok(id)
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Cancel a resting order: unlink it, release its remaining reserved
    /// notional, and re-announce the best of its side if it held the role
    /// (price 0 when the side emptied).
    pub fn cancel_order(&mut self, asset: AssetId, caller: OwnerId, id: u64) -> Result<(), ExchangeError> {
        let book = self.books.get_mut(&asset).ok_or(ExchangeError::NotFound { id })?;
        let key = book.key_of(id).ok_or(ExchangeError::NotFound { id })?;

        let node = book.node(key).ok_or(ExchangeError::NotFound { id })?;
        if node.order.owner != caller {
            return Err(ExchangeError::Unauthorized { caller, id });
        }

        let was_best_bid = book.best_bid_key() == Some(key);
        let was_best_ask = book.best_ask_key() == Some(key);

        let order = book.remove(key);
        match order.side() {
            // Remaining notional only: filled portions were settled already
            Side::Buy => self.ledger.release(NATIVE_ASSET, order.owner, order.price * order.amount),
            Side::Sell => self.ledger.release(asset, order.owner, order.amount),
        }

        if was_best_bid {
            let price = book.best_bid_price().unwrap_or(0);
            self.events.push(Event::NewBid { asset, price });
        }
        if was_best_ask {
            let price = book.best_ask_price().unwrap_or(0);
            self.events.push(Event::NewAsk { asset, price });
        }

        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Available/reserved balance of an owner in an asset
    pub fn get_balance(&self, asset: AssetId, owner: OwnerId) -> Balance {
        self.ledger.balance(asset, owner)
    }

    /// One order's view, or `NotFound` for destroyed/unknown ids
    pub fn get_order(&self, asset: AssetId, id: u64) -> Result<OrderInfo, ExchangeError> {
        self.books
            .get(&asset)
            .and_then(|book| book.order_info(id))
            .ok_or(ExchangeError::NotFound { id })
    }

    /// Book references as order ids; an untouched asset reads as all zeros
    pub fn get_order_book_info(&self, asset: AssetId) -> BookInfo {
        self.books.get(&asset).map(|book| book.info()).unwrap_or_default()
    }

    /// Direct read access to one asset's book (tests, diagnostics)
    pub fn book(&self, asset: AssetId) -> Option<&OrderBook> {
        self.books.get(&asset)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Events emitted so far, in emission order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the event queue
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // State digest
    // ========================================================================

    /// SHA-256 digest of the full exchange state.
    ///
    /// Hashes every resting order in traversal order per book (books in
    /// ascending asset order) plus the sorted ledger entries. Identical
    /// operation sequences produce identical roots.
    pub fn state_root(&self) -> Result<[u8; 32], ExchangeError> {
        let mut bytes = Vec::new();

        let mut assets: Vec<AssetId> = self.books.keys().copied().collect();
        assets.sort_unstable();
        for asset in assets {
            bytes.extend_from_slice(&asset.to_le_bytes());
            let book = &self.books[&asset];
            for order in book.iter() {
                let encoded = ssz_rs::serialize(order).map_err(|_| ExchangeError::Serialization)?;
                bytes.extend_from_slice(&encoded);
            }
        }

        let mut entries: Vec<_> = self.ledger.entries().collect();
        entries.sort_unstable_by_key(|&(asset, owner, _)| (asset, owner));
        for (asset, owner, balance) in entries {
            bytes.extend_from_slice(&asset.to_le_bytes());
            bytes.extend_from_slice(&owner.to_le_bytes());
            bytes.extend_from_slice(&balance.available.to_le_bytes());
            bytes.extend_from_slice(&balance.reserved.to_le_bytes());
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&Sha256::digest(&bytes));
        Ok(hash)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Order types for the chainbook matching engine.
//!
//! ## SSZ Serialization
//!
//! Orders derive `SimpleSerialize` from ssz_rs for deterministic encoding.
//! Basic fields (u64, u8) encode as little-endian per the SSZ spec, so the
//! same order always produces the same bytes - the state digest depends on
//! this.
//!
//! ## Remaining Amount
//!
//! `amount` is the *remaining* quantity. It only ever decreases: the
//! matching engine reduces it on every fill, and an order whose amount
//! reaches zero is destroyed. There is no mutable price or side.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
///
/// Represented as u8 in serialized form:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid) - pays the native asset for the traded token
    #[default]
    Buy,
    /// Sell order (ask) - pays the traded token for the native asset
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// Ids are assigned per order book, monotonically increasing from 1, and
/// never reused. A fully consumed or cancelled id reads back as not-found.
///
/// ## Example
///
/// ```
/// use chainbook::types::{Order, Side};
///
/// // Buy 5 units at price 100 for owner 7
/// let order = Order::new(1, 7, Side::Buy, 100, 5);
/// assert_eq!(order.side(), Side::Buy);
/// assert_eq!(order.amount, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier within its book (assigned by the engine)
    pub id: u64,

    /// Owner identity (caller attribution is external to the core)
    pub owner: u64,

    /// Order side as u8 (0=Buy, 1=Sell), raw for SSZ compatibility
    pub side_raw: u8,

    /// Limit price in native-asset units per token unit
    pub price: u64,

    /// Remaining quantity in token units; decreases monotonically to zero
    pub amount: u64,
}

impl Order {
    /// Create a new limit order
    pub fn new(id: u64, owner: u64, side: Side, price: u64, amount: u64) -> Self {
        Self {
            id,
            owner,
            side_raw: side.to_u8(),
            price,
            amount,
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.amount == 0
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The actual quantity filled (capped at the remaining amount)
    pub fn fill(&mut self, fill_amount: u64) -> u64 {
        let actual = fill_amount.min(self.amount);
        self.amount -= actual;
        actual
    }

    /// Native-asset notional backing this order's remainder (buy side)
    ///
    /// Returns `None` on u64 overflow.
    pub fn notional(&self) -> Option<u64> {
        self.price.checked_mul(self.amount)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

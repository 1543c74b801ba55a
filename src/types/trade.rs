//! Trade type representing an executed match between two orders.
//!
//! ## Price Discovery
//!
//! A trade always executes at the resting order's price. The aggressor's
//! limit only decides whether the pair crosses, never the execution price.

use ssz_rs::prelude::*;

use crate::types::Side;

/// A single fill between a resting order and an incoming aggressor.
///
/// `bid_id` and `ask_id` identify the buy and sell order regardless of
/// which one was the aggressor; `side_raw` records the aggressor's side.
///
/// ## Example
///
/// ```
/// use chainbook::types::{Side, Trade};
///
/// // Incoming sell hit resting bid 1 for 2 units at the bid's price 100
/// let trade = Trade::new(9, 1, 2, Side::Sell, 2, 100);
/// assert_eq!(trade.taker_side(), Side::Sell);
/// assert_eq!(trade.price, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Trade {
    /// Traded asset (token) identifier
    pub asset: u64,

    /// Id of the buy order involved in the fill
    pub bid_id: u64,

    /// Id of the sell order involved in the fill
    pub ask_id: u64,

    /// Aggressor side as u8 (0=Buy, 1=Sell), raw for SSZ compatibility
    pub side_raw: u8,

    /// Filled quantity in token units
    pub amount: u64,

    /// Execution price (the resting order's price)
    pub price: u64,
}

impl Trade {
    /// Create a new trade record
    pub fn new(asset: u64, bid_id: u64, ask_id: u64, taker_side: Side, amount: u64, price: u64) -> Self {
        Self {
            asset,
            bid_id,
            ask_id,
            side_raw: taker_side.to_u8(),
            amount,
            price,
        }
    }

    /// Side of the aggressor (the incoming order)
    pub fn taker_side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Native-asset value moved by this fill (price * amount)
    pub fn notional(&self) -> u128 {
        (self.price as u128) * (self.amount as u128)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

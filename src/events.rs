//! Notifications emitted by the exchange.
//!
//! The notifier is a synchronous outbound queue: the engine appends events
//! as it mutates state, observers drain them afterwards. Within one call
//! the queue preserves emission order - trades in fill order, then the
//! resting-order announcement, then any best-of-side change.

use crate::types::{AssetId, OwnerId, Side, Trade};

/// A fire-and-forget notification for external observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An incoming order (or its remainder) was inserted into the book
    NewOrder {
        asset: AssetId,
        owner: OwnerId,
        id: u64,
        side: Side,
        price: u64,
        amount: u64,
    },

    /// The best resting buy changed; price 0 means the bid side is empty
    NewBid { asset: AssetId, price: u64 },

    /// The best resting sell changed; price 0 means the ask side is empty
    NewAsk { asset: AssetId, price: u64 },

    /// A fill was executed
    Trade(Trade),
}

//! Core data types for chainbook
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order (remaining amount, immutable price/side)
//! - [`Side`]: Buy or Sell
//! - [`Trade`]: An executed fill between a bid and an ask
//! - [`Balance`]: Available/reserved custody of one owner in one asset
//!
//! Orders and trades implement SSZ serialization for deterministic encoding;
//! the exchange state digest is built from those bytes.

mod balance;
mod order;
mod trade;
pub mod units;

pub use balance::Balance;
pub use order::{Order, Side};
pub use trade::Trade;

/// Asset identifier; [`NATIVE_ASSET`] is the quote asset for every book
pub type AssetId = u64;

/// Owner identity, attributed by the execution environment
pub type OwnerId = u64;

/// The native value unit. Every order book trades a token against it.
pub const NATIVE_ASSET: AssetId = 0;

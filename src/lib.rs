//! # chainbook
//!
//! On-ledger token exchange core: deposit assets, place limit orders
//! against per-token order books, and let crossing orders match.
//!
//! ## Architecture
//!
//! - **Types**: core records (Order, Trade, Balance)
//! - **Ledger**: available/reserved custody per (asset, owner)
//! - **OrderBook**: one price-sorted list per token, slab-backed
//! - **Engine**: the Exchange - reservation, matching, settlement, events
//! - **Vault**: trait boundary to the external asset-transfer mechanism
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical operation sequences produce identical
//!    state roots
//! 2. **No floating point**: all balances and notionals are integer math
//! 3. **Conservation**: funds move only between available and reserved
//!    buckets or between counterparties; nothing is lost or double-counted
//! 4. **Synchronous execution**: one operation mutates state at a time

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Trade, Balance
pub mod types;

/// Error taxonomy
pub mod error;

/// Balance ledger: available/reserved per (asset, owner)
pub mod ledger;

/// Order book: slab arena + single price-sorted list per asset
pub mod orderbook;

/// Matching engine and exchange surface
pub mod engine;

/// Outbound notifications
pub mod events;

/// External asset-transfer boundary
pub mod vault;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::Exchange;
pub use error::ExchangeError;
pub use events::Event;
pub use ledger::BalanceLedger;
pub use orderbook::{BookInfo, OrderBook, OrderInfo, OrderNode};
pub use types::{AssetId, Balance, Order, OwnerId, Side, Trade, NATIVE_ASSET};
pub use vault::{AssetVault, MockVault};

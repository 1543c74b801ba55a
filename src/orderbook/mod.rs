//! Order book module: the ordered store of resting orders per asset.
//!
//! ## Architecture
//!
//! One [`OrderBook`] per traded asset:
//!
//! - **Slab arena**: order nodes keyed by `usize`, O(1) removal
//! - **Single sorted list**: both sides in one price-ascending doubly
//!   linked list; list pointers are slab keys
//! - **Cached references**: `first`, `last`, `best_bid`, `best_ask` for
//!   O(1) best-price lookup
//! - **Id index**: order id to slab key, O(1) cancel; ids are per-book,
//!   monotonic, never reused
//!
//! ## Components
//!
//! - [`OrderNode`]: arena record with `prev`/`next` pointers
//! - [`OrderBook`]: the list, caches, id allocation and query views

pub mod book;
pub mod node;

pub use book::{BookInfo, OrderBook, OrderInfo};
pub use node::OrderNode;

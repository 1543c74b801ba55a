//! Order node for slab-based storage.
//!
//! `OrderNode` wraps an [`Order`](crate::types::Order) with doubly-linked
//! list pointers so the book can splice an order out of the price-sorted
//! sequence in O(1) once its slab key is known. Pointers are slab keys
//! (`usize`), not references, which keeps the list free of cyclic ownership.

use crate::types::Order;

/// Order record in the book arena.
///
/// `prev`/`next` point along the single price-ascending list that holds
/// both sides of the book. `None` marks the ends of the list; query
/// surfaces translate it to the id sentinel 0.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The order data
    pub order: Order,

    /// Previous order in the book (lower or equal price), slab key
    pub prev: Option<usize>,

    /// Next order in the book (equal or higher price), slab key
    pub next: Option<usize>,
}

impl OrderNode {
    /// Create a new unlinked node
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            prev: None,
            next: None,
        }
    }

    /// Order id
    #[inline]
    pub fn id(&self) -> u64 {
        self.order.id
    }

    /// Limit price
    #[inline]
    pub fn price(&self) -> u64 {
        self.order.price
    }

    /// Remaining amount
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.amount
    }

    /// Reduce the remaining amount, returning the quantity actually filled
    #[inline]
    pub fn fill(&mut self, amount: u64) -> u64 {
        self.order.fill(amount)
    }

    /// True once the remaining amount reached zero
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}

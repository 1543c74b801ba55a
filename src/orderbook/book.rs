//! Per-asset order book: a single price-sorted list with cached extremes.
//!
//! ## Structure
//!
//! All resting orders of one traded asset, both sides, live in one doubly
//! linked list sorted ascending by price. Four cached references come with
//! it:
//!
//! - `first` / `last`: the ends of the list
//! - `best_bid`: the earliest-inserted buy at the highest buy price
//! - `best_ask`: the earliest-inserted sell at the lowest sell price
//!
//! In a quiescent book the buy block sits below the sell block and no buy
//! price reaches any sell price; crossing orders exist only transiently
//! inside a matching walk, which consumes them before returning.
//!
//! ## Storage
//!
//! Nodes live in a slab arena; list pointers are slab keys. Order ids are
//! per-book, monotonically increasing, never reused, and an id index gives
//! O(1) cancel-by-id. Queries translate absent references to the id
//! sentinel 0.

use std::collections::HashMap;

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{Order, Side};

/// External view of one order: prices and neighbor ids (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderInfo {
    pub price: u64,
    pub side: Side,
    pub amount: u64,
    pub next: u64,
    pub prev: u64,
}

/// External view of the book's cached references, as order ids (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookInfo {
    pub first_order: u64,
    pub best_bid: u64,
    pub best_ask: u64,
    pub last_order: u64,
}

/// Order book for a single traded asset.
///
/// ## Example
///
/// ```
/// use chainbook::orderbook::OrderBook;
/// use chainbook::types::{Order, Side};
///
/// let mut book = OrderBook::new();
/// let id = book.allocate_id();
/// book.insert(Order::new(id, 7, Side::Buy, 100, 5));
///
/// let info = book.info();
/// assert_eq!(info.first_order, 1);
/// assert_eq!(info.best_bid, 1);
/// assert_eq!(info.best_ask, 0);
/// assert_eq!(info.last_order, 1);
/// ```
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Arena of order nodes
    orders: Slab<OrderNode>,

    /// Order id to slab key (O(1) cancel)
    index: HashMap<u64, usize>,

    /// Head of the list (lowest price)
    first: Option<usize>,

    /// Tail of the list (highest price)
    last: Option<usize>,

    /// Earliest-inserted buy at the highest buy price
    best_bid: Option<usize>,

    /// Earliest-inserted sell at the lowest sell price
    best_ask: Option<usize>,

    /// Next order id; ids start at 1 and are never reused
    next_order_id: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            index: HashMap::new(),
            first: None,
            last: None,
            best_bid: None,
            best_ask: None,
            next_order_id: 1,
        }
    }

    /// Create a book with pre-allocated arena capacity
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            index: HashMap::with_capacity(order_capacity),
            first: None,
            last: None,
            best_bid: None,
            best_ask: None,
            next_order_id: 1,
        }
    }

    // ========================================================================
    // Ids and size
    // ========================================================================

    /// Take the next order id. Ids are handed out even to orders that end
    /// up fully filled without resting - trade records reference them.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_order_id;
        self.next_order_id += 1;
        id
    }

    /// Number of resting orders
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// True when no orders rest in the book
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert a resting order, maintaining price-time priority.
    ///
    /// The position is found by a linear scan from `first` for the first
    /// node whose price is strictly greater than the incoming price, so the
    /// new order lands after every equal-or-lower price - FIFO among equal
    /// prices. Best-of-side caches update with a strict comparison, which
    /// leaves the earliest order at the best price holding the role.
    ///
    /// # Returns
    ///
    /// The slab key of the inserted node.
    pub fn insert(&mut self, order: Order) -> usize {
        let id = order.id;
        let price = order.price;
        let side = order.side();

        let key = self.orders.insert(OrderNode::new(order));
        self.index.insert(id, key);

        // Find the first node with a strictly greater price
        let mut insert_before = None;
        let mut cursor = self.first;
        while let Some(k) = cursor {
            if self.orders[k].price() > price {
                insert_before = Some(k);
                break;
            }
            cursor = self.orders[k].next;
        }

        match insert_before {
            Some(next_key) => {
                let prev_key = self.orders[next_key].prev;
                self.orders[key].next = Some(next_key);
                self.orders[key].prev = prev_key;
                self.orders[next_key].prev = Some(key);
                match prev_key {
                    Some(p) => self.orders[p].next = Some(key),
                    None => self.first = Some(key),
                }
            }
            None => {
                // Append at the tail (also handles the empty book)
                self.orders[key].prev = self.last;
                match self.last {
                    Some(t) => self.orders[t].next = Some(key),
                    None => self.first = Some(key),
                }
                self.last = Some(key);
            }
        }

        match side {
            Side::Buy => {
                if self.best_bid.map_or(true, |b| price > self.orders[b].price()) {
                    self.best_bid = Some(key);
                }
            }
            Side::Sell => {
                if self.best_ask.map_or(true, |a| price < self.orders[a].price()) {
                    self.best_ask = Some(key);
                }
            }
        }

        key
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Unlink an order from the list and destroy it.
    ///
    /// Splices the neighbors together, fixes `first`/`last`, and - when the
    /// removed node held a best-of-side role - recomputes that cache by a
    /// full traversal. Later reads of the id return not-found.
    ///
    /// # Panics
    ///
    /// Panics if the key is not in the arena; callers pass keys obtained
    /// from this book.
    pub fn remove(&mut self, key: usize) -> Order {
        let prev = self.orders[key].prev;
        let next = self.orders[key].next;

        match prev {
            Some(p) => self.orders[p].next = next,
            None => self.first = next,
        }
        match next {
            Some(n) => self.orders[n].prev = prev,
            None => self.last = prev,
        }

        // Rescan after the splice so the removed node is excluded
        if self.best_bid == Some(key) {
            self.best_bid = self.scan_best_bid();
        }
        if self.best_ask == Some(key) {
            self.best_ask = self.scan_best_ask();
        }

        let node = self.orders.remove(key);
        self.index.remove(&node.id());
        node.order
    }

    /// Highest-priced buy, earliest first among equals (strict comparison
    /// keeps the FIFO head)
    fn scan_best_bid(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut cursor = self.first;
        while let Some(k) = cursor {
            let node = &self.orders[k];
            if node.order.side() == Side::Buy
                && best.map_or(true, |b| node.price() > self.orders[b].price())
            {
                best = Some(k);
            }
            cursor = node.next;
        }
        best
    }

    /// Lowest-priced sell, earliest first among equals
    fn scan_best_ask(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut cursor = self.first;
        while let Some(k) = cursor {
            let node = &self.orders[k];
            if node.order.side() == Side::Sell
                && best.map_or(true, |a| node.price() < self.orders[a].price())
            {
                best = Some(k);
            }
            cursor = node.next;
        }
        best
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Slab key for an order id
    #[inline]
    pub fn key_of(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Node by slab key
    #[inline]
    pub fn node(&self, key: usize) -> Option<&OrderNode> {
        self.orders.get(key)
    }

    /// Mutable node by slab key
    #[inline]
    pub fn node_mut(&mut self, key: usize) -> Option<&mut OrderNode> {
        self.orders.get_mut(key)
    }

    /// Slab key of the best resting buy
    #[inline]
    pub fn best_bid_key(&self) -> Option<usize> {
        self.best_bid
    }

    /// Slab key of the best resting sell
    #[inline]
    pub fn best_ask_key(&self) -> Option<usize> {
        self.best_ask
    }

    /// Price of the best resting buy
    #[inline]
    pub fn best_bid_price(&self) -> Option<u64> {
        self.best_bid.map(|k| self.orders[k].price())
    }

    /// Price of the best resting sell
    #[inline]
    pub fn best_ask_price(&self) -> Option<u64> {
        self.best_ask.map(|k| self.orders[k].price())
    }

    // ========================================================================
    // Query views
    // ========================================================================

    /// View of one order with neighbor ids, or `None` if the id is unknown
    pub fn order_info(&self, id: u64) -> Option<OrderInfo> {
        let key = self.key_of(id)?;
        let node = &self.orders[key];
        Some(OrderInfo {
            price: node.price(),
            side: node.order.side(),
            amount: node.remaining(),
            next: self.id_at(node.next),
            prev: self.id_at(node.prev),
        })
    }

    /// View of the cached references as order ids (0 = none)
    pub fn info(&self) -> BookInfo {
        BookInfo {
            first_order: self.id_at(self.first),
            best_bid: self.id_at(self.best_bid),
            best_ask: self.id_at(self.best_ask),
            last_order: self.id_at(self.last),
        }
    }

    fn id_at(&self, key: Option<usize>) -> u64 {
        key.map_or(0, |k| self.orders[k].id())
    }

    /// Iterate resting orders from `first` to `last` (ascending price)
    pub fn iter(&self) -> BookIter<'_> {
        BookIter {
            book: self,
            cursor: self.first,
        }
    }
}

/// Iterator over resting orders in list order
pub struct BookIter<'a> {
    book: &'a OrderBook,
    cursor: Option<usize>,
}

impl<'a> Iterator for BookIter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = &self.book.orders[key];
        self.cursor = node.next;
        Some(&node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

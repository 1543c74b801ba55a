//! Matching engine module for chainbook.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: the same operation sequence always produces the
//!    same books, balances and state root
//! 2. **Integer math**: notionals are checked u64 products, no floating
//!    point anywhere in the engine
//! 3. **Synchronous execution**: every placement or cancellation runs to
//!    completion as one atomic step
//! 4. **Price-time priority**: resting price wins, ties go to the earlier
//!    arrival, execution always at the resting order's price
//!
//! ## Matching Rules
//!
//! - Incoming buys consume asks from the lowest price upward while their
//!   limit still crosses; incoming sells consume bids from the highest
//!   price downward
//! - Partial fills are supported on both sides of every fill
//! - The unfilled remainder rests in the book; a fully consumed aggressor
//!   never enters it

pub mod exchange;

pub use exchange::Exchange;

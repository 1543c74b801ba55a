//! Stress tests for the chainbook exchange.
//!
//! These tests verify:
//! 1. The book stays structurally sound under high load
//! 2. Funds are conserved across arbitrary place/cancel/match sequences
//! 3. Determinism is preserved across runs
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_mixed_workload -- --nocapture
//! ```

use std::time::Instant;

use chainbook::{Exchange, MockVault, Side, NATIVE_ASSET};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

const TOKEN: u64 = 9;

/// Number of participants in the random workload
const OWNER_COUNT: u64 = 16;

/// Native funding per participant, large enough that placements rarely
/// bounce off the reservation check
const NATIVE_FUND: u64 = 1_000_000_000_000;

/// Token funding per participant
const TOKEN_FUND: u64 = 1_000_000_000;

/// Number of operations for the main mixed workload
const STRESS_OP_COUNT: usize = 50_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Exchange with every participant funded in both assets.
fn funded_exchange() -> Exchange<MockVault> {
    let mut exchange = Exchange::new(MockVault::new());
    for owner in 1..=OWNER_COUNT {
        exchange.deposit(owner, NATIVE_FUND).unwrap();
        exchange.vault_mut().set_balance(TOKEN, owner, TOKEN_FUND);
        exchange.vault_mut().approve(TOKEN, owner, TOKEN_FUND);
        exchange.deposit_token(TOKEN, owner, TOKEN_FUND).unwrap();
    }
    exchange
}

/// A random order around a tight spread so the book stays bounded.
/// Returns (owner, side, amount, price).
fn random_order(rng: &mut ChaCha8Rng) -> (u64, Side, u64, u64) {
    let owner = rng.gen_range(1..=OWNER_COUNT);
    let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
    let amount = rng.gen_range(1..=50u64);
    let price = rng.gen_range(900..=1_100u64);
    (owner, side, amount, price)
}

/// Drive a seeded place/cancel workload and return the final state root.
fn run_seeded_workload(seed: u64, ops: usize) -> [u8; 32] {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut exchange = funded_exchange();
    let mut resting: Vec<(u64, u64)> = Vec::new(); // (owner, id)

    for _ in 0..ops {
        if !resting.is_empty() && rng.gen_bool(0.25) {
            let idx = rng.gen_range(0..resting.len());
            let (owner, id) = resting.swap_remove(idx);
            // The order may have been consumed by matching since it rested
            let _ = exchange.cancel_order(TOKEN, owner, id);
        }

        let (owner, side, amount, price) = random_order(&mut rng);
        let placed = match side {
            Side::Buy => exchange.buy(TOKEN, owner, amount, price),
            Side::Sell => exchange.sell(TOKEN, owner, amount, price),
        };
        if let Ok(id) = placed {
            if exchange.get_order(TOKEN, id).is_ok() {
                resting.push((owner, id));
            }
        }
        exchange.take_events();
    }

    exchange.state_root().unwrap()
}

/// Structural checks over a quiescent book: prices ascend along the list,
/// the cached best pointers agree with a full scan, and the resting sides
/// do not cross.
fn assert_book_invariants(exchange: &Exchange<MockVault>, asset: u64) {
    let book = match exchange.book(asset) {
        Some(book) => book,
        None => return,
    };

    let orders: Vec<_> = book.iter().collect();
    for pair in orders.windows(2) {
        assert!(
            pair[0].price <= pair[1].price,
            "list out of order: {} before {}",
            pair[0].price,
            pair[1].price
        );
    }

    let scanned_bid = orders
        .iter()
        .filter(|o| o.side() == Side::Buy)
        .map(|o| o.price)
        .max();
    let scanned_ask = orders
        .iter()
        .filter(|o| o.side() == Side::Sell)
        .map(|o| o.price)
        .min();
    assert_eq!(book.best_bid_price(), scanned_bid, "cached best bid");
    assert_eq!(book.best_ask_price(), scanned_ask, "cached best ask");

    if let (Some(bid), Some(ask)) = (scanned_bid, scanned_ask) {
        assert!(bid < ask, "resting orders cross: bid {} >= ask {}", bid, ask);
    }
}

/// Funds never leave the system through matching, only shift between
/// owners and between the available and reserved buckets.
fn assert_conservation(exchange: &Exchange<MockVault>) {
    let native_total: u64 = (1..=OWNER_COUNT)
        .map(|owner| exchange.get_balance(NATIVE_ASSET, owner).total())
        .sum();
    let token_total: u64 = (1..=OWNER_COUNT)
        .map(|owner| exchange.get_balance(TOKEN, owner).total())
        .sum();
    assert_eq!(native_total, OWNER_COUNT * NATIVE_FUND, "native conserved");
    assert_eq!(token_total, OWNER_COUNT * TOKEN_FUND, "token conserved");
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Main stress test: a long mixed place/cancel/match workload.
///
/// # Verification
/// - No panics during execution
/// - Book invariants hold at quiescence
/// - Both assets are fully conserved
/// - Some matching occurred
#[test]
fn stress_mixed_workload() {
    println!("\n=== STRESS TEST: Mixed Workload ===\n");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut exchange = funded_exchange();
    let mut resting: Vec<(u64, u64)> = Vec::new();

    let mut orders_placed = 0usize;
    let mut orders_cancelled = 0usize;
    let mut orders_rejected = 0usize;
    let mut trade_count = 0usize;

    println!("Processing {} operations (seed=42)...", STRESS_OP_COUNT);
    let start = Instant::now();

    for _ in 0..STRESS_OP_COUNT {
        if !resting.is_empty() && rng.gen_bool(0.25) {
            let idx = rng.gen_range(0..resting.len());
            let (owner, id) = resting.swap_remove(idx);
            if exchange.cancel_order(TOKEN, owner, id).is_ok() {
                orders_cancelled += 1;
            }
        }

        let (owner, side, amount, price) = random_order(&mut rng);
        let placed = match side {
            Side::Buy => exchange.buy(TOKEN, owner, amount, price),
            Side::Sell => exchange.sell(TOKEN, owner, amount, price),
        };
        match placed {
            Ok(id) => {
                orders_placed += 1;
                if exchange.get_order(TOKEN, id).is_ok() {
                    resting.push((owner, id));
                }
            }
            Err(_) => orders_rejected += 1,
        }

        trade_count += exchange
            .take_events()
            .iter()
            .filter(|e| matches!(e, chainbook::Event::Trade(_)))
            .count();
    }

    let elapsed = start.elapsed();
    let ops = orders_placed + orders_cancelled;
    let throughput = ops as f64 / elapsed.as_secs_f64();

    println!("\n=== RESULTS ===");
    println!("  Orders placed:     {:>12}", orders_placed);
    println!("  Orders cancelled:  {:>12}", orders_cancelled);
    println!("  Orders rejected:   {:>12}", orders_rejected);
    println!("  Trades generated:  {:>12}", trade_count);
    println!("  Final book size:   {:>12}", exchange.book(TOKEN).map_or(0, |b| b.len()));
    println!();
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!("  Throughput:        {:>12.0} ops/sec", throughput);

    assert!(trade_count > 0, "Expected some trades to occur");
    assert_book_invariants(&exchange, TOKEN);
    assert_conservation(&exchange);

    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Verify determinism: the same seeded sequence produces an identical
/// state root on every run, and a different seed produces a different one.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const TEST_OPS: usize = 5_000;
    const SEED: u64 = 12345;

    println!("Running workload with {} operations (seed={})...", TEST_OPS, SEED);

    let root1 = run_seeded_workload(SEED, TEST_OPS);
    let root2 = run_seeded_workload(SEED, TEST_OPS);

    println!("  Run 1 state root: {}", hex::encode(root1));
    println!("  Run 2 state root: {}", hex::encode(root2));

    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run_seeded_workload(SEED + 1, TEST_OPS);
    println!("  Different seed:   {}", hex::encode(root3));
    assert_ne!(root1, root3, "Different seeds should produce different roots");

    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Invariants hold not only at the end but at checkpoints along the way.
#[test]
fn stress_checkpointed_invariants() {
    println!("\n=== CHECKPOINTED INVARIANTS TEST ===\n");

    const OPS: usize = 10_000;
    const CHECK_EVERY: usize = 500;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut exchange = funded_exchange();
    let mut resting: Vec<(u64, u64)> = Vec::new();
    let mut checkpoints = 0usize;

    for i in 0..OPS {
        if !resting.is_empty() && rng.gen_bool(0.25) {
            let idx = rng.gen_range(0..resting.len());
            let (owner, id) = resting.swap_remove(idx);
            let _ = exchange.cancel_order(TOKEN, owner, id);
        }

        let (owner, side, amount, price) = random_order(&mut rng);
        let placed = match side {
            Side::Buy => exchange.buy(TOKEN, owner, amount, price),
            Side::Sell => exchange.sell(TOKEN, owner, amount, price),
        };
        if let Ok(id) = placed {
            if exchange.get_order(TOKEN, id).is_ok() {
                resting.push((owner, id));
            }
        }
        exchange.take_events();

        if (i + 1) % CHECK_EVERY == 0 {
            assert_book_invariants(&exchange, TOKEN);
            assert_conservation(&exchange);
            checkpoints += 1;
        }
    }

    println!("  Operations:        {:>12}", OPS);
    println!("  Checkpoints:       {:>12}", checkpoints);
    println!("\n=== CHECKPOINTED INVARIANTS PASSED ===\n");
}

/// Timing across load sizes. Numbers are printed for inspection only,
/// the list scan is linear so large books are not a performance target.
#[test]
fn stress_scaling() {
    println!("\n=== SCALING TEST ===\n");

    let test_sizes = [1_000usize, 5_000, 10_000, 25_000];

    println!("{:>12} {:>12} {:>12}", "Operations", "Time", "Throughput");
    println!("{:-<12} {:-<12} {:-<12}", "", "", "");

    for &size in &test_sizes {
        let start = Instant::now();
        let _root = run_seeded_workload(42, size);
        let elapsed = start.elapsed();
        let throughput = size as f64 / elapsed.as_secs_f64();

        println!("{:>12} {:>12.2?} {:>12.0}", size, elapsed, throughput);
    }

    println!("\n=== SCALING TEST COMPLETE ===\n");
}

/// With balanced buys and sells around a tight spread, matching keeps the
/// book from growing without bound.
#[test]
fn stress_book_stays_bounded() {
    println!("\n=== BOOK SIZE TEST ===\n");

    const OPS: usize = 20_000;
    const MAX_BOOK_SIZE: usize = 10_000;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut exchange = funded_exchange();
    let mut max_size_seen = 0usize;

    for _ in 0..OPS {
        let (owner, side, amount, price) = random_order(&mut rng);
        let _ = match side {
            Side::Buy => exchange.buy(TOKEN, owner, amount, price),
            Side::Sell => exchange.sell(TOKEN, owner, amount, price),
        };
        exchange.take_events();

        let size = exchange.book(TOKEN).map_or(0, |b| b.len());
        if size > max_size_seen {
            max_size_seen = size;
        }
    }

    println!("  Operations:        {:>12}", OPS);
    println!("  Max book size:     {:>12}", max_size_seen);
    println!("  Final book size:   {:>12}", exchange.book(TOKEN).map_or(0, |b| b.len()));

    assert!(
        max_size_seen < MAX_BOOK_SIZE,
        "Book grew too large: {} (max {})",
        max_size_seen,
        MAX_BOOK_SIZE
    );

    println!("\n=== BOOK SIZE TEST PASSED ===\n");
}

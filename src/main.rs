//! chainbook - demo walkthrough binary.
//!
//! Funds two participants, crosses a pair of orders, and prints the
//! resulting balances, events and state root.

use chainbook::types::units;
use chainbook::{Event, Exchange, MockVault, NATIVE_ASSET};

const TOKEN: u64 = 9;
const BUYER: u64 = 1;
const SELLER: u64 = 2;

fn main() {
    println!("===========================================");
    println!("  chainbook - on-ledger exchange core");
    println!("===========================================");
    println!();

    let mut exchange = Exchange::new(MockVault::new());

    // Fund both sides
    exchange.deposit(BUYER, 10_000).expect("deposit");
    exchange.vault_mut().set_balance(TOKEN, SELLER, 1_000);
    exchange.vault_mut().approve(TOKEN, SELLER, 1_000);
    exchange.deposit_token(TOKEN, SELLER, 1_000).expect("token deposit");

    println!("Funded buyer with 10000 native, seller with 1000 of token {}", TOKEN);
    println!();

    // A resting bid, then a crossing ask
    let bid = exchange.buy(TOKEN, BUYER, 5, 100).expect("buy");
    println!("Placed buy order {} (5 @ 100)", bid);

    let ask = exchange.sell(TOKEN, SELLER, 2, 90).expect("sell");
    println!("Placed sell order {} (2 @ 90) - crosses the resting bid", ask);
    println!();

    println!("Events:");
    for event in exchange.take_events() {
        match event {
            Event::NewOrder { id, side, price, amount, .. } => {
                println!("  NewOrder {{ id: {}, side: {:?}, price: {}, amount: {} }}", id, side, price, amount);
            }
            Event::NewBid { price, .. } => println!("  NewBid  {{ price: {} }}", price),
            Event::NewAsk { price, .. } => println!("  NewAsk  {{ price: {} }}", price),
            Event::Trade(trade) => {
                println!(
                    "  Trade   {{ bid: {}, ask: {}, taker: {:?}, amount: {}, price: {} }}",
                    trade.bid_id, trade.ask_id, trade.taker_side(), trade.amount, trade.price
                );
            }
        }
    }
    println!();

    let book = exchange.get_order_book_info(TOKEN);
    println!("Book: first={} bestBid={} bestAsk={} last={}",
        book.first_order, book.best_bid, book.best_ask, book.last_order);

    let buyer_native = exchange.get_balance(NATIVE_ASSET, BUYER);
    let seller_native = exchange.get_balance(NATIVE_ASSET, SELLER);
    println!("Buyer native:  available={} reserved={}", buyer_native.available, buyer_native.reserved);
    println!("Seller native: available={} reserved={}", seller_native.available, seller_native.reserved);
    println!("Buyer tokens:  {}", exchange.get_balance(TOKEN, BUYER).available);
    println!();

    println!("Display units: {} base units = {}", 150_000_000u64, units::from_units(150_000_000));

    match exchange.state_root() {
        Ok(root) => println!("State root: {}", hex::encode(root)),
        Err(e) => println!("State root unavailable: {}", e),
    }
}

//! Matchbook - demo binary
//!
//! Replays a short order sequence through the engine and prints the book.
//! Set `RUST_LOG=debug` to see every trade and resting order.

use matchbook::types::price::TickSize;
use matchbook::{MatchingEngine, Order, Side};
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // One tick = 0.01
    let tick = TickSize::new(Decimal::new(1, 2)).expect("tick size is positive");
    let mut engine = MatchingEngine::new();

    let orders = [
        ("a", "1", Side::Buy, "10.00", 20),
        ("b", "2", Side::Buy, "10.00", 30),
        ("c", "3", Side::Buy, "10.00", 10),
        ("e", "5", Side::Buy, "9.50", 15),
        ("f", "6", Side::Sell, "10.25", 40),
        ("d", "4", Side::Sell, "10.00", 55),
    ];

    for (owner, id, side, price, volume) in orders {
        let Some(ticks) = tick.to_ticks(price) else {
            error!(owner, id, price, "price is not a whole number of ticks");
            continue;
        };

        match engine.submit(Order::new(owner, id, side, ticks, volume)) {
            Ok(trades) => {
                for trade in trades {
                    info!(
                        buyer = %trade.buyer,
                        seller = %trade.seller,
                        price = %tick.format_ticks(trade.price).unwrap_or_else(|| trade.price.to_string()),
                        volume = trade.volume,
                        "trade"
                    );
                }
            }
            Err(err) => error!(%err, "submit rejected"),
        }
    }

    println!();
    println!("{}", engine.book());
    println!("State root: {}", hex::encode(engine.book().compute_state_root()));
}

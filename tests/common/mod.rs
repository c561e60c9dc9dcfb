//! Helpers shared by the integration tests.

#![allow(dead_code)]

use matchbook::{MatchingEngine, Order, Price, Side, Trade, Volume};

pub fn buy(owner: &str, id: &str, price: Price, volume: Volume) -> Order {
    Order::new(owner, id, Side::Buy, price, volume)
}

pub fn sell(owner: &str, id: &str, price: Price, volume: Volume) -> Order {
    Order::new(owner, id, Side::Sell, price, volume)
}

/// (buyer owner, seller owner, price, volume) per trade
pub fn summarize(trades: &[Trade]) -> Vec<(String, String, Price, Volume)> {
    trades
        .iter()
        .map(|t| (t.buyer_owner().to_string(), t.seller_owner().to_string(), t.price, t.volume))
        .collect()
}

pub fn expected(rows: &[(&str, &str, Price, Volume)]) -> Vec<(String, String, Price, Volume)> {
    rows.iter()
        .map(|&(b, s, p, v)| (b.to_string(), s.to_string(), p, v))
        .collect()
}

/// Check every structural invariant of the book:
///
/// - each active level is non-empty and its index volume equals the sum
///   of its queue
/// - every queued order is reachable through the order index
/// - order counts agree across the three structures
/// - the book is not crossed
pub fn assert_invariants(engine: &MatchingEngine) {
    let book = engine.book();
    let mut indexed = 0;

    for side in [Side::Buy, Side::Sell] {
        let prices = engine.price_levels(side);

        let mut sorted = prices.clone();
        match side {
            Side::Buy => sorted.sort_by(|a, b| b.cmp(a)),
            Side::Sell => sorted.sort(),
        }
        sorted.dedup();
        assert_eq!(prices, sorted, "{side} levels must be unique and best first");

        for &price in &prices {
            let queue = book.orders_at(side, price);
            assert!(!queue.is_empty(), "{side} level {price} is empty but listed");

            let sum: Volume = queue.iter().map(|o| o.volume).sum();
            assert_eq!(
                engine.volume_at_level(side, price),
                sum,
                "{side} volume index drifted at {price}"
            );

            for order in queue {
                assert!(order.volume > 0, "filled order {} still resting", order.key);
                assert_eq!(order.side, side);
                assert_eq!(order.price, price);
                assert_eq!(book.order(&order.key), Some(order));
                indexed += 1;
            }
        }
    }

    assert_eq!(indexed, book.order_count());
    assert_eq!(book.bid_count() + book.ask_count(), book.order_count());

    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "book rests crossed: bid {bid} >= ask {ask}");
    }
}

//! Single-instrument limit order book.
//!
//! ## Architecture
//!
//! - **Slab**: arena owning every resting order; everything else holds
//!   `usize` handles into it
//! - **SideBook** (x2): price-ordered levels plus the per-side volume index
//! - **HashMap**: `OrderKey` -> slab key, for O(1) cancel
//!
//! The three structures are only mutated together, through the
//! crate-private `rest` and `remove` below and the matching sweep in
//! [`engine`](crate::engine). Everything public here is read-only.
//!
//! ## Example
//!
//! ```
//! use matchbook::{MatchingEngine, Order, Side};
//!
//! let mut engine = MatchingEngine::new();
//! engine.submit(Order::new("a", "1", Side::Buy, 10, 20)).unwrap();
//! engine.submit(Order::new("b", "2", Side::Sell, 12, 5)).unwrap();
//!
//! let book = engine.book();
//! assert_eq!(book.best_bid(), Some(10));
//! assert_eq!(book.best_ask(), Some(12));
//! assert_eq!(book.spread(), Some(2));
//! ```

use std::collections::HashMap;
use std::fmt;

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::orderbook::{Asks, Bids, LevelSummary, OrderNode, PriceLevel, SideBook};
use crate::types::{Order, OrderKey, Price, Side, Volume};

/// Limit order book for one instrument
#[derive(Debug)]
pub struct OrderBook {
    /// Resting order storage
    pub(crate) orders: Slab<OrderNode>,

    /// Bid levels (highest first)
    pub(crate) bids: SideBook<Bids>,

    /// Ask levels (lowest first)
    pub(crate) asks: SideBook<Asks>,

    /// Order identity -> slab key
    pub(crate) index: HashMap<OrderKey, usize>,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with `order_capacity` pre-allocated order slots
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(10_000);
    /// assert!(book.capacity() >= 10_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: SideBook::new(),
            asks: SideBook::new(),
            index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated order slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.order_count()
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.order_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Read-only view of the bid side
    #[inline]
    pub fn bids(&self) -> &SideBook<Bids> {
        &self.bids
    }

    /// Read-only view of the ask side
    #[inline]
    pub fn asks(&self) -> &SideBook<Asks> {
        &self.asks
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    /// Highest resting buy price
    #[inline]
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Lowest resting sell price
    #[inline]
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// `best_ask - best_bid`, or None if either side is empty
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Level Queries
    // ========================================================================

    /// Active prices on `side`, best first
    pub fn price_levels(&self, side: Side) -> Vec<Price> {
        match side {
            Side::Buy => self.bids.prices(),
            Side::Sell => self.asks.prices(),
        }
    }

    /// Total resting volume on `side` at `price`, 0 if none
    #[inline]
    pub fn volume_at_level(&self, side: Side, price: Price) -> Volume {
        match side {
            Side::Buy => self.bids.volume_at(price),
            Side::Sell => self.asks.volume_at(price),
        }
    }

    /// Orders resting on `side` at `price`, oldest first
    pub fn orders_at(&self, side: Side, price: Price) -> Vec<&Order> {
        let level = match side {
            Side::Buy => self.bids.level_at(price),
            Side::Sell => self.asks.level_at(price),
        };
        level
            .map(|level| self.queue(level).collect())
            .unwrap_or_default()
    }

    /// Up to `max_levels` level summaries on `side`, best first
    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<LevelSummary> {
        match side {
            Side::Buy => self.bids.depth(max_levels),
            Side::Sell => self.asks.depth(max_levels),
        }
    }

    // ========================================================================
    // Order Lookup
    // ========================================================================

    /// Check if an order is resting
    #[inline]
    pub fn contains(&self, key: &OrderKey) -> bool {
        self.index.contains_key(key)
    }

    /// A resting order by identity
    pub fn order(&self, key: &OrderKey) -> Option<&Order> {
        let slab_key = *self.index.get(key)?;
        self.orders.get(slab_key).map(|node| &node.order)
    }

    fn queue<'a>(&'a self, level: &PriceLevel) -> impl Iterator<Item = &'a Order> + 'a {
        level.keys(&self.orders).map(move |key| &self.orders[key].order)
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over the canonical book contents.
    ///
    /// Bids then asks, each best first, each level oldest first. Two books
    /// built from the same submit/cancel sequence have the same root.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for level in self.bids.levels().chain(self.asks.levels()) {
            for order in self.queue(level) {
                hash_field(&mut hasher, order.key.owner.as_bytes());
                hash_field(&mut hasher, order.key.id.as_bytes());
                hasher.update([side_tag(order.side)]);
                hasher.update(order.price.to_le_bytes());
                hasher.update(order.volume.to_le_bytes());
            }
        }

        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    // ========================================================================
    // Mutation (matching engine only)
    // ========================================================================

    /// Rest `order` at the back of its price level, indexing it.
    ///
    /// The caller guarantees the key is not already resting.
    pub(crate) fn rest(&mut self, order: Order) -> usize {
        let key = order.key.clone();
        let side = order.side;

        let slab_key = self.orders.insert(OrderNode::new(order));
        self.index.insert(key, slab_key);

        match side {
            Side::Buy => self.bids.push_back(slab_key, &mut self.orders),
            Side::Sell => self.asks.push_back(slab_key, &mut self.orders),
        }

        slab_key
    }

    /// Remove a resting order from its level, the volume index, the order
    /// index and the arena.
    pub(crate) fn remove(&mut self, key: &OrderKey) -> Option<Order> {
        let slab_key = self.index.remove(key)?;
        let side = self.orders.get(slab_key)?.order.side;

        match side {
            Side::Buy => self.bids.remove(slab_key, &mut self.orders),
            Side::Sell => self.asks.remove(slab_key, &mut self.orders),
        };

        Some(self.orders.remove(slab_key).order)
    }
}

fn hash_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

fn side_tag(side: Side) -> u8 {
    match side {
        Side::Buy => 0,
        Side::Sell => 1,
    }
}

// ============================================================================
// Display
// ============================================================================

/// Two-column ladder, one line per resting order:
///
/// ```text
///       Bid | Ask
/// a 20 @ 10 | b 5 @ 12
///  c 10 @ 9 |
/// ```
impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |order: &Order| format!("{} {} @ {}", order.key.owner, order.volume, order.price);

        let bids: Vec<String> = self
            .bids
            .levels()
            .flat_map(|level| self.queue(level))
            .map(render)
            .collect();
        let asks: Vec<String> = self
            .asks
            .levels()
            .flat_map(|level| self.queue(level))
            .map(render)
            .collect();

        let width = bids.iter().map(String::len).max().unwrap_or(0).max(3);
        writeln!(f, "{:>width$} | Ask", "Bid")?;

        for row in 0..bids.len().max(asks.len()) {
            let bid = bids.get(row).map(String::as_str).unwrap_or("");
            let ask = asks.get(row).map(String::as_str).unwrap_or("");
            writeln!(f, "{:>width$} | {}", bid, ask)?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn buy(owner: &str, id: &str, price: Price, volume: Volume) -> Order {
        Order::new(owner, id, Side::Buy, price, volume)
    }

    fn sell(owner: &str, id: &str, price: Price, volume: Volume) -> Order {
        Order::new(owner, id, Side::Sell, price, volume)
    }

    #[test]
    fn test_book_new() {
        let book = OrderBook::new();

        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_book_with_capacity() {
        let book = OrderBook::with_capacity(1_000);
        assert!(book.capacity() >= 1_000);
    }

    #[test]
    fn test_rest_indexes_all_three_structures() {
        let mut book = OrderBook::new();
        book.rest(buy("a", "1", 10, 20));

        let key = OrderKey::new("a", "1");
        assert!(book.contains(&key));
        assert_eq!(book.order(&key).map(|o| o.volume), Some(20));
        assert_eq!(book.price_levels(Side::Buy), vec![10]);
        assert_eq!(book.volume_at_level(Side::Buy, 10), 20);
        assert_eq!(book.bid_count(), 1);
        assert_eq!(book.ask_count(), 0);
    }

    #[test]
    fn test_remove_clears_all_three_structures() {
        let mut book = OrderBook::new();
        book.rest(buy("a", "1", 20, 30));

        let removed = book.remove(&OrderKey::new("a", "1"));
        assert_eq!(removed.map(|o| o.volume), Some(30));

        assert!(book.is_empty());
        assert!(!book.contains(&OrderKey::new("a", "1")));
        assert!(book.price_levels(Side::Buy).is_empty());
        assert_eq!(book.volume_at_level(Side::Buy, 20), 0);
        assert!(book.remove(&OrderKey::new("a", "1")).is_none());
    }

    #[test]
    fn test_spread() {
        let mut book = OrderBook::new();
        book.rest(buy("a", "1", 10, 1));
        assert!(book.spread().is_none());

        book.rest(sell("b", "2", 13, 1));
        assert_eq!(book.spread(), Some(3));
    }

    #[test]
    fn test_orders_at_in_time_priority() {
        let mut book = OrderBook::new();
        book.rest(sell("a", "1", 20, 30));
        book.rest(sell("b", "2", 20, 10));
        book.rest(sell("c", "3", 25, 10));

        let owners: Vec<&str> = book
            .orders_at(Side::Sell, 20)
            .into_iter()
            .map(Order::owner)
            .collect();
        assert_eq!(owners, vec!["a", "b"]);
        assert!(book.orders_at(Side::Sell, 21).is_empty());
        assert!(book.orders_at(Side::Buy, 20).is_empty());
    }

    #[test]
    fn test_depth_by_side() {
        let mut book = OrderBook::new();
        book.rest(buy("a", "1", 10, 20));
        book.rest(buy("b", "2", 9, 5));
        book.rest(buy("c", "3", 10, 1));

        let depth = book.depth(Side::Buy, 5);
        assert_eq!(depth.len(), 2);
        assert_eq!(depth[0], LevelSummary { price: 10, volume: 21, order_count: 2 });
        assert_eq!(depth[1], LevelSummary { price: 9, volume: 5, order_count: 1 });
        assert!(book.depth(Side::Sell, 5).is_empty());
    }

    #[test]
    fn test_state_root_deterministic() {
        let build = || {
            let mut book = OrderBook::new();
            book.rest(buy("a", "1", 10, 20));
            book.rest(sell("b", "2", 12, 5));
            book
        };

        assert_eq!(build().compute_state_root(), build().compute_state_root());

        let mut other = build();
        other.rest(buy("c", "3", 9, 1));
        assert_ne!(build().compute_state_root(), other.compute_state_root());
    }

    #[test]
    fn test_state_root_sensitive_to_queue_order() {
        let mut first = OrderBook::new();
        first.rest(buy("a", "1", 10, 20));
        first.rest(buy("b", "2", 10, 20));

        let mut second = OrderBook::new();
        second.rest(buy("b", "2", 10, 20));
        second.rest(buy("a", "1", 10, 20));

        assert_ne!(first.compute_state_root(), second.compute_state_root());
    }

    #[test]
    fn test_display_ladder() {
        let mut book = OrderBook::new();
        book.rest(buy("y", "1", 15, 100));
        book.rest(sell("b", "2", 16, 100));
        book.rest(sell("a", "3", 17, 100));

        let rendered = book.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "       Bid | Ask",
                "y 100 @ 15 | b 100 @ 16",
                "           | a 100 @ 17",
            ]
        );
    }
}

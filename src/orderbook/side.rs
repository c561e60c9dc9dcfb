//! One side of the book: price levels plus the volume index.
//!
//! ## Price Ordering
//!
//! Both sides share one implementation, parameterised by a zero-sized
//! ordering marker:
//!
//! - [`Bids`]: keyed by `Reverse<Price>`, best = highest
//! - [`Asks`]: keyed by `Price`, best = lowest
//!
//! so `BTreeMap` iteration order is always best-first and the best level
//! is the first entry.
//!
//! ## Volume Index
//!
//! `volumes` maps each active price to the sum of remaining volume resting
//! there. It is updated on every push, fill and removal so that
//! `volume_at` is a single hash lookup. An entry exists exactly while its
//! level does.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::marker::PhantomData;

use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{Price, Side, Volume};

/// Ordering of price levels on one side of the book.
pub trait PriceOrder {
    /// Map key whose natural order puts the best price first
    type Key: Ord + Copy + Debug;

    /// Side whose orders rest here
    const SIDE: Side;

    fn key(price: Price) -> Self::Key;
}

/// Bid ordering: highest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct Bids;

/// Ask (offer) ordering: lowest price first
#[derive(Debug, Clone, Copy, Default)]
pub struct Asks;

impl PriceOrder for Bids {
    type Key = Reverse<Price>;
    const SIDE: Side = Side::Buy;

    #[inline]
    fn key(price: Price) -> Self::Key {
        Reverse(price)
    }
}

impl PriceOrder for Asks {
    type Key = Price;
    const SIDE: Side = Side::Sell;

    #[inline]
    fn key(price: Price) -> Self::Key {
        price
    }
}

/// Aggregate view of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    pub price: Price,
    pub volume: Volume,
    pub order_count: usize,
}

/// Price-ordered levels and volume index for one side of the book.
#[derive(Debug)]
pub struct SideBook<O: PriceOrder> {
    /// Non-empty price levels, best first
    levels: BTreeMap<O::Key, PriceLevel>,

    /// Price -> total remaining volume at that price
    volumes: HashMap<Price, Volume>,

    /// Number of resting orders on this side
    order_count: usize,

    _order: PhantomData<O>,
}

impl<O: PriceOrder> Default for SideBook<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: PriceOrder> SideBook<O> {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            volumes: HashMap::new(),
            order_count: 0,
            _order: PhantomData,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn side(&self) -> Side {
        O::SIDE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Number of active price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Best price on this side, or None if empty
    #[inline]
    pub fn best_price(&self) -> Option<Price> {
        self.best_level().map(|level| level.price)
    }

    #[inline]
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.levels.values().next()
    }

    /// The level at `price`, if any order rests there
    #[inline]
    pub fn level_at(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&O::key(price))
    }

    /// Active levels, best first
    pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        self.levels.values()
    }

    /// Active prices, best first
    pub fn prices(&self) -> Vec<Price> {
        self.levels().map(|level| level.price).collect()
    }

    /// Total resting volume at `price`, 0 if no level exists
    #[inline]
    pub fn volume_at(&self, price: Price) -> Volume {
        self.volumes.get(&price).copied().unwrap_or(0)
    }

    /// Volume that can still be added at `price` before the level's
    /// aggregate would exceed `Volume::MAX`
    #[inline]
    pub fn volume_headroom(&self, price: Price) -> Volume {
        Volume::MAX - self.volume_at(price)
    }

    /// Up to `max_levels` level summaries, best first
    pub fn depth(&self, max_levels: usize) -> Vec<LevelSummary> {
        self.levels()
            .take(max_levels)
            .map(|level| LevelSummary {
                price: level.price,
                volume: self.volume_at(level.price),
                order_count: level.order_count,
            })
            .collect()
    }

    // ========================================================================
    // Mutation (driven by the matching engine only)
    // ========================================================================

    /// Append the node at `key` to the back of its price level,
    /// creating the level if needed.
    ///
    /// # Panics
    ///
    /// Panics if the order's remaining volume exceeds
    /// [`volume_headroom`](Self::volume_headroom) at its price
    pub(crate) fn push_back(&mut self, key: usize, arena: &mut Slab<OrderNode>) {
        let node = &arena[key];
        let price = node.price();
        let remaining = node.remaining();

        self.levels
            .entry(O::key(price))
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(key, arena);

        let volume = self.volumes.entry(price).or_insert(0);
        *volume = volume.checked_add(remaining).expect("level volume overflow");
        self.order_count += 1;
    }

    /// Unlink the node at `key` from its level, dropping its remaining
    /// volume from the index. Empty levels are removed together with
    /// their index entry.
    ///
    /// The node itself stays in the arena.
    ///
    /// # Panics
    ///
    /// Panics if the node's price level is missing from this side
    ///
    /// # Returns
    ///
    /// The remaining volume of the unlinked order
    pub(crate) fn remove(&mut self, key: usize, arena: &mut Slab<OrderNode>) -> Volume {
        let node = &arena[key];
        let price = node.price();
        let remaining = node.remaining();

        let level = self
            .levels
            .get_mut(&O::key(price))
            .expect("resting order without a price level");
        level.remove(key, arena);

        if level.is_empty() {
            self.levels.remove(&O::key(price));
            self.volumes.remove(&price);
        } else {
            self.reduce_volume(price, remaining);
        }
        self.order_count -= 1;

        remaining
    }

    /// Drop `filled` from the volume index after a partial or full fill
    pub(crate) fn reduce_volume(&mut self, price: Price, filled: Volume) {
        if let Some(volume) = self.volumes.get_mut(&price) {
            debug_assert!(*volume >= filled, "fill exceeds level volume at {price}");
            *volume = volume.saturating_sub(filled);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Order;

    fn insert<O: PriceOrder>(
        side: &mut SideBook<O>,
        arena: &mut Slab<OrderNode>,
        id: &str,
        price: Price,
        volume: Volume,
    ) -> usize {
        let key = arena.insert(OrderNode::new(Order::new("a", id, O::SIDE, price, volume)));
        side.push_back(key, arena);
        key
    }

    #[test]
    fn test_side_book_new() {
        let bids: SideBook<Bids> = SideBook::new();

        assert!(bids.is_empty());
        assert_eq!(bids.side(), Side::Buy);
        assert!(bids.best_price().is_none());
        assert_eq!(bids.volume_at(10), 0);
        assert!(bids.prices().is_empty());
    }

    #[test]
    fn test_bids_best_first() {
        let mut arena = Slab::new();
        let mut bids: SideBook<Bids> = SideBook::new();

        insert(&mut bids, &mut arena, "1", 10, 20);
        insert(&mut bids, &mut arena, "2", 20, 20);
        insert(&mut bids, &mut arena, "3", 15, 20);

        assert_eq!(bids.best_price(), Some(20));
        assert_eq!(bids.prices(), vec![20, 15, 10]);
    }

    #[test]
    fn test_asks_best_first() {
        let mut arena = Slab::new();
        let mut asks: SideBook<Asks> = SideBook::new();

        insert(&mut asks, &mut arena, "1", 40, 30);
        insert(&mut asks, &mut arena, "2", 20, 30);
        insert(&mut asks, &mut arena, "3", 30, 30);

        assert_eq!(asks.side(), Side::Sell);
        assert_eq!(asks.best_price(), Some(20));
        assert_eq!(asks.prices(), vec![20, 30, 40]);
    }

    #[test]
    fn test_volume_index_aggregates() {
        let mut arena = Slab::new();
        let mut bids: SideBook<Bids> = SideBook::new();

        insert(&mut bids, &mut arena, "1", 10, 20);
        insert(&mut bids, &mut arena, "2", 10, 30);
        insert(&mut bids, &mut arena, "3", 12, 5);

        assert_eq!(bids.volume_at(10), 50);
        assert_eq!(bids.volume_at(12), 5);
        assert_eq!(bids.volume_at(11), 0);
        assert_eq!(bids.order_count(), 3);
        assert_eq!(bids.level_count(), 2);
        assert_eq!(bids.level_at(10).map(|l| l.order_count), Some(2));
    }

    #[test]
    fn test_volume_headroom() {
        let mut arena = Slab::new();
        let mut bids: SideBook<Bids> = SideBook::new();

        assert_eq!(bids.volume_headroom(10), Volume::MAX);

        let half = 1u64 << 63;
        insert(&mut bids, &mut arena, "1", 10, half);
        assert_eq!(bids.volume_headroom(10), half - 1);
        assert_eq!(bids.volume_headroom(11), Volume::MAX);

        // Filling the level fully exhausts the headroom but stays exact
        insert(&mut bids, &mut arena, "2", 10, half - 1);
        assert_eq!(bids.volume_at(10), Volume::MAX);
        assert_eq!(bids.volume_headroom(10), 0);
    }

    #[test]
    #[should_panic(expected = "level volume overflow")]
    fn test_push_back_past_headroom_panics() {
        let mut arena = Slab::new();
        let mut bids: SideBook<Bids> = SideBook::new();

        insert(&mut bids, &mut arena, "1", 10, 1 << 63);
        insert(&mut bids, &mut arena, "2", 10, 1 << 63);
    }

    #[test]
    #[should_panic(expected = "resting order without a price level")]
    fn test_remove_unlinked_node_panics() {
        let mut arena = Slab::new();
        let mut asks: SideBook<Asks> = SideBook::new();

        let key = arena.insert(OrderNode::new(Order::new("a", "1", Side::Sell, 10, 5)));
        asks.remove(key, &mut arena);
    }

    #[test]
    fn test_remove_drops_empty_level_and_index_entry() {
        let mut arena = Slab::new();
        let mut bids: SideBook<Bids> = SideBook::new();

        let k1 = insert(&mut bids, &mut arena, "1", 10, 20);
        let k2 = insert(&mut bids, &mut arena, "2", 10, 30);

        assert_eq!(bids.remove(k1, &mut arena), 20);
        assert_eq!(bids.volume_at(10), 30);
        assert_eq!(bids.prices(), vec![10]);

        assert_eq!(bids.remove(k2, &mut arena), 30);
        assert_eq!(bids.volume_at(10), 0);
        assert!(bids.level_at(10).is_none());
        assert!(bids.is_empty());
        assert_eq!(bids.order_count(), 0);
    }

    #[test]
    fn test_reduce_volume_on_partial_fill() {
        let mut arena = Slab::new();
        let mut asks: SideBook<Asks> = SideBook::new();

        let key = insert(&mut asks, &mut arena, "1", 10, 20);
        arena[key].order.fill(15);
        asks.reduce_volume(10, 15);

        assert_eq!(asks.volume_at(10), 5);

        // Removing the partially filled order subtracts only what remains
        assert_eq!(asks.remove(key, &mut arena), 5);
        assert_eq!(asks.volume_at(10), 0);
    }

    #[test]
    fn test_depth_summary() {
        let mut arena = Slab::new();
        let mut asks: SideBook<Asks> = SideBook::new();

        insert(&mut asks, &mut arena, "1", 20, 30);
        insert(&mut asks, &mut arena, "2", 20, 30);
        insert(&mut asks, &mut arena, "3", 40, 30);
        insert(&mut asks, &mut arena, "4", 50, 1);

        let depth = asks.depth(2);
        assert_eq!(
            depth,
            vec![
                LevelSummary { price: 20, volume: 60, order_count: 2 },
                LevelSummary { price: 40, volume: 30, order_count: 1 },
            ]
        );
        assert_eq!(asks.depth(10).len(), 3);
    }
}

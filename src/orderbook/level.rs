//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resting orders at a single price.
//! Orders are kept in a doubly-linked list threaded through the slab,
//! oldest first (time priority).
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be removed in O(1) using its slab key
//!
//! Aggregate volume is not tracked here; it lives in the side's volume
//! index (see [`SideBook`](crate::orderbook::SideBook)).

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::Price;

/// A price level containing orders at a single price.
///
/// The order data lives in the slab; this struct only holds the queue
/// metadata.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level
    pub price: Price,

    /// Head of the order queue (oldest order, slab key)
    pub head: Option<usize>,

    /// Tail of the order queue (newest order, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// Check if the price level is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue
    ///
    /// # Panics
    ///
    /// Panics if `key` or the current tail is not in the slab
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("invalid slab key");
        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            slab.get_mut(tail_key).expect("invalid tail key").next = Some(key);
        } else {
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
    }

    /// Unlink an order from the queue by slab key
    ///
    /// The node stays in the slab; the caller owns its removal.
    ///
    /// # Panics
    ///
    /// Panics if `key` or one of its neighbours is not in the slab
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get(key).expect("invalid slab key");
        let prev_key = node.prev;
        let next_key = node.next;

        match prev_key {
            Some(prev) => slab.get_mut(prev).expect("invalid prev key").next = next_key,
            None => self.head = next_key,
        }

        match next_key {
            Some(next) => slab.get_mut(next).expect("invalid next key").prev = prev_key,
            None => self.tail = prev_key,
        }

        let node = slab.get_mut(key).expect("invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
    }

    /// Slab key of the oldest order, the next to be matched
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Iterate slab keys from oldest to newest
    pub fn keys<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelKeys<'a> {
        LevelKeys {
            slab,
            cursor: self.head,
        }
    }
}

/// Iterator over the slab keys of a price level, oldest first.
pub struct LevelKeys<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl Iterator for LevelKeys<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let key = self.cursor?;
        self.cursor = self.slab.get(key).and_then(|node| node.next);
        Some(key)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

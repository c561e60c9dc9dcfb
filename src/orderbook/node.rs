//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps a resting `Order` with doubly-linked list pointers so
//! it can be unlinked from its price level in O(1) given its slab key.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! ## Linked List
//!
//! Orders at the same price level form a doubly-linked list:
//! - `next`: the next (newer) order in the level
//! - `prev`: the previous (older) order in the level

use crate::types::{Order, OrderKey, Price, Volume};

/// Order node stored in the slab.
///
/// The pointers are slab keys (`usize`), not references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The resting order
    pub order: Order,

    /// Next order in the price level queue (slab key)
    /// None if this is the tail (newest order)
    pub next: Option<usize>,

    /// Previous order in the price level queue (slab key)
    /// None if this is the head (oldest order)
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked order node
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::orderbook::OrderNode;
    /// use matchbook::{Order, Side};
    ///
    /// let node = OrderNode::new(Order::new("a", "1", Side::Buy, 10, 20));
    ///
    /// assert!(node.next.is_none());
    /// assert!(node.prev.is_none());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
        }
    }

    /// Check if this node is unlinked (not part of any price level)
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn key(&self) -> &OrderKey {
        &self.order.key
    }

    #[inline]
    pub fn price(&self) -> Price {
        self.order.price
    }

    /// Remaining volume of the resting order
    #[inline]
    pub fn remaining(&self) -> Volume {
        self.order.volume
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Price-time priority matching.
//!
//! ## Algorithm
//!
//! While the incoming order has volume left:
//!
//! 1. Look at the best level of the opposite side. Stop if there is none
//!    or the incoming limit does not cross it.
//! 2. Fill against the oldest order at that level for
//!    `min(incoming, resting)`, at the resting order's price.
//! 3. Drop the fill from the opposite volume index; remove the resting
//!    order (and its level, if emptied) once it reaches zero.
//!
//! Any residual rests at the back of its own side's level.

use std::collections::HashMap;

use slab::Slab;
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, InvalidOrderReason, Result};
use crate::orderbook::{OrderBook, OrderNode, PriceOrder, SideBook};
use crate::types::{Order, OrderKey, Price, Side, Trade, Volume};

/// Matching engine for a single instrument.
///
/// Owns its [`OrderBook`]. The book, its volume indices and the order
/// index only change through [`submit`](Self::submit) and
/// [`cancel`](Self::cancel), so they never drift apart.
///
/// Not thread-safe by design: callers that share one engine must
/// serialize access to it.
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    config: EngineConfig,
    /// Sequence number of the last trade produced
    last_trade_sequence: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with `order_capacity` pre-allocated order slots
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self::with_config(EngineConfig::default().with_order_capacity(order_capacity))
    }

    /// Create an engine sized by `config`
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            book: OrderBook::with_capacity(config.order_capacity),
            config,
            last_trade_sequence: 0,
        }
    }

    /// Sizing this engine was created with
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of the book
    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Number of trades produced so far
    #[inline]
    pub fn trades_executed(&self) -> u64 {
        self.last_trade_sequence
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Match `order` against the book and rest any residual.
    ///
    /// # Returns
    ///
    /// The trades generated, oldest resting counterparty first (so best
    /// price level first). Empty if nothing crossed.
    ///
    /// # Errors
    ///
    /// * [`EngineError::InvalidOrder`] - price or volume not positive, or
    ///   resting the volume would overflow its level's aggregate
    /// * [`EngineError::DuplicateOrder`] - the identity is already resting
    ///
    /// The book is unchanged on error.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::{MatchingEngine, Order, Side};
    ///
    /// let mut engine = MatchingEngine::new();
    /// engine.submit(Order::new("a", "1", Side::Buy, 10, 20)).unwrap();
    ///
    /// let trades = engine.submit(Order::new("b", "2", Side::Sell, 9, 5)).unwrap();
    /// assert_eq!(trades.len(), 1);
    /// assert_eq!(trades[0].price, 10);
    /// assert_eq!(engine.volume_at_level(Side::Buy, 10), 15);
    /// ```
    pub fn submit(&mut self, mut order: Order) -> Result<Vec<Trade>> {
        if let Err(err) = self.validate(&order) {
            warn!(order = %order.key, side = %order.side, price = order.price, volume = order.volume, error = %err, "order rejected");
            return Err(err);
        }

        let mut trades = Vec::with_capacity(self.config.trade_buffer_capacity);
        let book = &mut self.book;
        let sequence = &mut self.last_trade_sequence;

        match order.side {
            Side::Buy => sweep(&mut book.asks, &mut book.orders, &mut book.index, sequence, &mut order, &mut trades),
            Side::Sell => sweep(&mut book.bids, &mut book.orders, &mut book.index, sequence, &mut order, &mut trades),
        }

        if !order.is_filled() {
            debug!(
                order = %order.key,
                side = %order.side,
                price = order.price,
                volume = order.volume,
                "order resting"
            );
            book.rest(order);
        }

        Ok(trades)
    }

    fn validate(&self, order: &Order) -> Result<()> {
        if order.price <= 0 {
            return Err(EngineError::InvalidOrder {
                key: order.key.clone(),
                reason: InvalidOrderReason::NonPositivePrice(order.price),
            });
        }
        if order.volume == 0 {
            return Err(EngineError::InvalidOrder {
                key: order.key.clone(),
                reason: InvalidOrderReason::ZeroVolume,
            });
        }
        if self.book.contains(&order.key) {
            return Err(EngineError::DuplicateOrder(order.key.clone()));
        }

        // Checked against the full volume, before any fill
        let headroom = match order.side {
            Side::Buy => self.book.bids.volume_headroom(order.price),
            Side::Sell => self.book.asks.volume_headroom(order.price),
        };
        if order.volume > headroom {
            return Err(EngineError::InvalidOrder {
                key: order.key.clone(),
                reason: InvalidOrderReason::VolumeOverflow(headroom),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Cancel
    // ========================================================================

    /// Cancel a resting order.
    ///
    /// # Returns
    ///
    /// `true` if the order was resting and is now gone, `false` if it was
    /// unknown, already filled or already cancelled.
    pub fn cancel(&mut self, owner: &str, id: &str) -> bool {
        self.cancel_key(&OrderKey::new(owner, id))
    }

    /// [`cancel`](Self::cancel) by identity
    pub fn cancel_key(&mut self, key: &OrderKey) -> bool {
        match self.book.remove(key) {
            Some(order) => {
                debug!(
                    order = %order.key,
                    side = %order.side,
                    price = order.price,
                    remaining = order.volume,
                    "order cancelled"
                );
                true
            }
            None => {
                trace!(order = %key, "cancel for order not resting");
                false
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Active prices on `side`, best first
    pub fn price_levels(&self, side: Side) -> Vec<Price> {
        self.book.price_levels(side)
    }

    /// Total resting volume on `side` at `price`, 0 if none
    pub fn volume_at_level(&self, side: Side, price: Price) -> Volume {
        self.book.volume_at_level(side, price)
    }
}

/// Fill `taker` against `opposite` while it crosses.
///
/// Generic over the opposite side's ordering so the side is resolved once
/// per submit rather than on every fill.
fn sweep<O: PriceOrder>(
    opposite: &mut SideBook<O>,
    arena: &mut Slab<OrderNode>,
    index: &mut HashMap<OrderKey, usize>,
    sequence: &mut u64,
    taker: &mut Order,
    trades: &mut Vec<Trade>,
) {
    while !taker.is_filled() {
        let Some(level) = opposite.best_level() else {
            break;
        };
        if !taker.side.crosses(taker.price, level.price) {
            break;
        }
        let price = level.price;
        let Some(head) = level.peek_head() else {
            break;
        };

        let maker = &mut arena[head].order;
        let fill = taker.volume.min(maker.volume);
        maker.fill(fill);
        taker.fill(fill);

        *sequence += 1;
        let trade = Trade::execute(*sequence, taker, maker, fill);
        debug!(
            sequence = trade.sequence,
            buyer = %trade.buyer,
            seller = %trade.seller,
            price = trade.price,
            volume = trade.volume,
            "trade executed"
        );
        trades.push(trade);

        let maker_filled = maker.is_filled();
        opposite.reduce_volume(price, fill);

        if maker_filled {
            opposite.remove(head, arena);
            let node = arena.remove(head);
            index.remove(&node.order.key);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

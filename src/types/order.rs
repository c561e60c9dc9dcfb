//! Order types for the matching core.
//!
//! An order's identity is the `(owner, id)` pair carried by [`OrderKey`].
//! Everything but the remaining volume is fixed once the order is created.

use std::fmt;

use crate::types::{Price, Volume};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy order (bid) - rests on the bid book, matches against offers
    Buy,
    /// Sell order (offer) - rests on the offer book, matches against bids
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Whether an order on this side with limit `limit` crosses the
    /// opposite book's best price `best`.
    ///
    /// A buy crosses when `limit >= best`, a sell when `limit <= best`.
    ///
    /// # Example
    ///
    /// ```
    /// use matchbook::Side;
    ///
    /// assert!(Side::Buy.crosses(10, 10));
    /// assert!(!Side::Buy.crosses(9, 10));
    /// assert!(Side::Sell.crosses(9, 10));
    /// ```
    #[inline]
    pub fn crosses(self, limit: Price, best: Price) -> bool {
        match self {
            Side::Buy => limit >= best,
            Side::Sell => limit <= best,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

// ============================================================================
// OrderKey
// ============================================================================

/// Identity of an order: the owning participant plus their order id.
///
/// Unique across the book while the order rests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderKey {
    /// Participant that submitted the order
    pub owner: String,
    /// Owner-assigned order identifier
    pub id: String,
}

impl OrderKey {
    pub fn new(owner: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.id)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// ## Example
///
/// ```
/// use matchbook::{Order, Side};
///
/// // Owner "a" bids for 20 at price 10
/// let order = Order::new("a", "1", Side::Buy, 10, 20);
/// assert_eq!(order.volume, 20);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Identity (owner, id)
    pub key: OrderKey,

    /// Buy or Sell
    pub side: Side,

    /// Limit price in integer ticks
    pub price: Price,

    /// Remaining volume, decremented on every fill
    pub volume: Volume,

    /// Volume at submission
    pub original_volume: Volume,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Arguments
    ///
    /// * `owner` - Participant identifier
    /// * `id` - Order identifier, unique per owner while resting
    /// * `side` - Buy or Sell
    /// * `price` - Limit price in ticks
    /// * `volume` - Quantity
    pub fn new(
        owner: impl Into<String>,
        id: impl Into<String>,
        side: Side,
        price: Price,
        volume: Volume,
    ) -> Self {
        Self {
            key: OrderKey::new(owner, id),
            side,
            price,
            volume,
            original_volume: volume,
        }
    }

    /// Owner of this order
    #[inline]
    pub fn owner(&self) -> &str {
        &self.key.owner
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.volume == 0
    }

    /// Volume executed so far
    pub fn filled_volume(&self) -> Volume {
        self.original_volume.saturating_sub(self.volume)
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The volume actually filled, capped at what remains
    pub fn fill(&mut self, qty: Volume) -> Volume {
        let actual = qty.min(self.volume);
        self.volume -= actual;
        actual
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

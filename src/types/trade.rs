//! Trade type representing an executed match between two orders.

use crate::types::{Order, OrderKey, Price, Side, Volume};

/// A trade represents a single match between a resting and an incoming order.
///
/// ## Terminology
///
/// - **Resting**: the order that was already in the book
/// - **Aggressor**: the incoming order that triggered the match
///
/// ## Price
///
/// The trade always executes at the resting order's price, so any price
/// improvement accrues to the aggressor.
///
/// ## Example
///
/// ```
/// use matchbook::{OrderKey, Side, Trade};
///
/// let trade = Trade::new(
///     1,                          // sequence
///     OrderKey::new("a", "1"),    // buyer
///     OrderKey::new("d", "4"),    // seller
///     Side::Sell,                 // aggressor
///     10,                         // price
///     20,                         // volume
/// );
/// assert_eq!(trade.buyer_owner(), "a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trade {
    /// Book-local trade number, starting at 1
    pub sequence: u64,

    /// Identity of the buy order
    pub buyer: OrderKey,

    /// Identity of the sell order
    pub seller: OrderKey,

    /// Side of the incoming order
    pub aggressor: Side,

    /// Execution price (the resting order's price)
    pub price: Price,

    /// Executed volume
    pub volume: Volume,
}

impl Trade {
    pub fn new(
        sequence: u64,
        buyer: OrderKey,
        seller: OrderKey,
        aggressor: Side,
        price: Price,
        volume: Volume,
    ) -> Self {
        Self {
            sequence,
            buyer,
            seller,
            aggressor,
            price,
            volume,
        }
    }

    /// Build the trade for `aggressor` filling `volume` against `resting`.
    ///
    /// Buyer and seller are assigned from the aggressor's side; the price
    /// is always the resting order's.
    pub(crate) fn execute(sequence: u64, aggressor: &Order, resting: &Order, volume: Volume) -> Self {
        let (buyer, seller) = match aggressor.side {
            Side::Buy => (aggressor.key.clone(), resting.key.clone()),
            Side::Sell => (resting.key.clone(), aggressor.key.clone()),
        };
        Self::new(sequence, buyer, seller, aggressor.side, resting.price, volume)
    }

    /// Owner on the buy side
    #[inline]
    pub fn buyer_owner(&self) -> &str {
        &self.buyer.owner
    }

    /// Owner on the sell side
    #[inline]
    pub fn seller_owner(&self) -> &str {
        &self.seller.owner
    }

    /// Notional value of this trade (price * volume), widened to avoid overflow
    pub fn notional(&self) -> i128 {
        i128::from(self.price) * i128::from(self.volume)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

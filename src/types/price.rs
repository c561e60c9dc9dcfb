//! Decimal price to integer tick conversion.
//!
//! ## Overview
//!
//! The matching core only ever sees integer ticks. Venues quote prices as
//! decimals, so [`TickSize`] converts between the two at the boundary
//! without touching floating point.
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::price::TickSize;
//! use rust_decimal::Decimal;
//!
//! // One tick = 0.01
//! let tick = TickSize::new(Decimal::new(1, 2)).unwrap();
//!
//! assert_eq!(tick.to_ticks("10.25"), Some(1025));
//! assert_eq!(tick.format_ticks(1025).as_deref(), Some("10.25"));
//!
//! // Not a whole number of ticks
//! assert_eq!(tick.to_ticks("10.255"), None);
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::types::Price;

/// Minimum price increment of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSize(Decimal);

impl TickSize {
    /// Create a tick size
    ///
    /// # Returns
    ///
    /// `None` if `tick` is zero or negative
    pub fn new(tick: Decimal) -> Option<Self> {
        if tick <= Decimal::ZERO {
            return None;
        }
        Some(Self(tick))
    }

    /// The underlying decimal increment
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Convert a decimal price string into ticks
    ///
    /// # Returns
    ///
    /// * `Some(Price)` - Number of ticks
    /// * `None` - If parsing fails, the price is not a whole number of
    ///   ticks, or the result does not fit in a `Price`
    pub fn to_ticks(&self, s: &str) -> Option<Price> {
        let decimal = Decimal::from_str(s.trim()).ok()?;
        self.decimal_to_ticks(decimal)
    }

    /// Convert a decimal price into ticks
    pub fn decimal_to_ticks(&self, d: Decimal) -> Option<Price> {
        let ticks = d.checked_div(self.0)?;
        if !ticks.fract().is_zero() {
            return None;
        }
        ticks.to_i64()
    }

    /// Convert ticks into a decimal price
    ///
    /// # Returns
    ///
    /// `None` if the product does not fit in a `Decimal`
    pub fn ticks_to_decimal(&self, ticks: Price) -> Option<Decimal> {
        Decimal::from(ticks).checked_mul(self.0)
    }

    /// Render ticks as a decimal string at the tick's precision
    pub fn format_ticks(&self, ticks: Price) -> Option<String> {
        let decimal = self.ticks_to_decimal(ticks)?;
        Some(format!("{:.*}", self.0.scale() as usize, decimal))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

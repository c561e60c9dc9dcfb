//! Core value types for the matching core
//!
//! ## Types
//!
//! - [`Order`]: A limit order
//! - [`OrderKey`]: Order identity (owner, id)
//! - [`Side`]: Buy or Sell
//! - [`Trade`]: An executed match between two orders
//!
//! ## Units
//!
//! Prices are integer ticks ([`Price`]), volumes are unsigned 64-bit
//! quantities ([`Volume`]). See [`price::TickSize`] for decimal conversion.

mod order;
mod trade;
pub mod price;

/// Price in integer ticks
pub type Price = i64;

/// Order quantity
pub type Volume = u64;

// Re-export all types at module level
pub use order::{Order, OrderKey, Side};
pub use trade::Trade;

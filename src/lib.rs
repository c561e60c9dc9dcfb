//! # Matchbook
//!
//! Matching core of a single-instrument limit order book.
//!
//! ## Architecture
//!
//! - **Types**: Order, OrderKey, Side, Trade
//! - **OrderBook**: slab arena, price-ordered levels per side, volume
//!   index and order index
//! - **Engine**: price-time priority matching, cancel and book queries
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **No Floating Point**: Prices are integer ticks
//! 3. **Arena Storage**: Resting orders live in one slab; indices hold keys
//! 4. **Synchronous Execution**: No async, no I/O, no internal locking
//!
//! Networking, persistence, risk checks and multi-instrument routing belong
//! to the venue embedding this crate.
//!
//! ## Example
//!
//! ```
//! use matchbook::{MatchingEngine, Order, Side};
//!
//! let mut engine = MatchingEngine::new();
//! engine.submit(Order::new("a", "1", Side::Buy, 10, 20)).unwrap();
//! engine.submit(Order::new("b", "2", Side::Buy, 10, 30)).unwrap();
//!
//! let trades = engine.submit(Order::new("d", "4", Side::Sell, 10, 25)).unwrap();
//! assert_eq!(trades[0].buyer_owner(), "a");
//! assert_eq!(trades[1].buyer_owner(), "b");
//! assert_eq!(engine.volume_at_level(Side::Buy, 10), 25);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Trade
pub mod types;

/// Order book: slab-backed levels and indices
pub mod orderbook;

/// Matching engine: submit, cancel, queries
pub mod engine;

/// Engine sizing configuration
pub mod config;

/// Submit errors
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::MatchingEngine;
pub use error::{EngineError, InvalidOrderReason, Result};
pub use orderbook::{LevelSummary, OrderBook};
pub use types::{Order, OrderKey, Price, Side, Trade, Volume};

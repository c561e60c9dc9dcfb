//! Matching engine module.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same submit/cancel sequence always produces the same
//!    trades and the same book
//! 2. **Integer Ticks**: No floating-point operations
//! 3. **Synchronous Execution**: Every call runs to completion, no I/O
//! 4. **Price-Time Priority**: Best price first, then FIFO
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - **Trades** execute at the resting order's price
//! - **Partial fills** are supported
//! - **Unfilled volume** rests on the book
//!
//! ## Example
//!
//! ```
//! use matchbook::{MatchingEngine, Order, Side};
//!
//! let mut engine = MatchingEngine::new();
//!
//! // Resting sell
//! engine.submit(Order::new("a", "1", Side::Sell, 10, 100)).unwrap();
//!
//! // Incoming buy crosses it
//! let trades = engine.submit(Order::new("b", "2", Side::Buy, 10, 100)).unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert!(engine.book().is_empty());
//! ```

pub mod matcher;

pub use matcher::MatchingEngine;

//! Order book storage for the matching core.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: every resting order lives in one arena;
//!   levels and the order index hold `usize` handles into it
//! - **Price levels**: per-side `BTreeMap`, best price first
//! - **Price-time priority**: FIFO queue at each price level
//! - **Volume index**: per-side price -> aggregate resting volume
//!
//! ## Components
//!
//! - [`OrderNode`]: `Order` plus linked-list pointers for its level
//! - [`PriceLevel`]: FIFO of orders at a single price
//! - [`SideBook`]: price-ordered levels and volume index for one side
//! - [`OrderBook`]: both sides, the arena and the order index
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log n) |
//! | Cancel by identity | O(log n) (level lookup), O(1) unlink |
//! | Best bid/ask | O(log n) |
//! | Volume at price | O(1) |
//! | Price levels | O(levels) |

pub mod node;
pub mod level;
pub mod side;
pub mod book;

pub use node::OrderNode;
pub use level::{LevelKeys, PriceLevel};
pub use side::{Asks, Bids, LevelSummary, PriceOrder, SideBook};
pub use book::OrderBook;

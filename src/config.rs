//! Engine configuration.

/// Default number of pre-allocated order slots
pub const DEFAULT_ORDER_CAPACITY: usize = 1024;

/// Default capacity of the trade vector returned by each submit
pub const DEFAULT_TRADE_BUFFER_CAPACITY: usize = 8;

/// Sizing knobs for a [`MatchingEngine`](crate::MatchingEngine).
///
/// Neither value limits the book; both only pre-allocate.
///
/// ## Example
///
/// ```
/// use matchbook::{EngineConfig, MatchingEngine};
///
/// let config = EngineConfig::default().with_order_capacity(100_000);
/// let engine = MatchingEngine::with_config(config);
/// assert!(engine.book().capacity() >= 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Slots pre-allocated in the order arena and order index
    pub order_capacity: usize,

    /// Initial capacity of each submit's trade vector
    pub trade_buffer_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            trade_buffer_capacity: DEFAULT_TRADE_BUFFER_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn with_order_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    pub fn with_trade_buffer_capacity(mut self, trade_buffer_capacity: usize) -> Self {
        self.trade_buffer_capacity = trade_buffer_capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.order_capacity, DEFAULT_ORDER_CAPACITY);
        assert_eq!(config.trade_buffer_capacity, DEFAULT_TRADE_BUFFER_CAPACITY);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_order_capacity(10)
            .with_trade_buffer_capacity(2);
        assert_eq!(config.order_capacity, 10);
        assert_eq!(config.trade_buffer_capacity, 2);
    }
}

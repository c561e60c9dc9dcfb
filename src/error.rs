//! Error types for the matching core.
//!
//! Only `submit` can fail. A rejected submit leaves the book untouched.
//! Cancelling an unknown order is not an error; `cancel` reports it as
//! `false`.

use thiserror::Error;

use crate::types::{OrderKey, Price, Volume};

/// Why an order failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOrderReason {
    /// Price must be at least one tick
    NonPositivePrice(Price),
    /// Volume must be at least one unit
    ZeroVolume,
    /// Resting the full volume would push the level's aggregate past
    /// `Volume::MAX`; carries the headroom left at that price
    VolumeOverflow(Volume),
}

impl std::fmt::Display for InvalidOrderReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidOrderReason::NonPositivePrice(price) => {
                write!(f, "price must be positive, got {price}")
            }
            InvalidOrderReason::ZeroVolume => f.write_str("volume must be positive"),
            InvalidOrderReason::VolumeOverflow(headroom) => {
                write!(f, "volume exceeds level headroom of {headroom}")
            }
        }
    }
}

/// Errors returned by [`MatchingEngine::submit`](crate::MatchingEngine::submit)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The order failed validation
    #[error("invalid order {key}: {reason}")]
    InvalidOrder {
        key: OrderKey,
        reason: InvalidOrderReason,
    },

    /// An order with the same (owner, id) is already resting
    #[error("order {0} is already resting")]
    DuplicateOrder(OrderKey),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

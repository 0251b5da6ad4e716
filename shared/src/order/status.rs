//! Order status state machine
//!
//! ```text
//! Processing ──▶ Shipped ──▶ Delivered (terminal)
//! ```
//!
//! Strictly forward, one step at a time. The machine holds no state of its
//! own: it validates a transition over a status stored by the server. The
//! caller must pair every successful `advance` with a persistence request and
//! keep the old status until the server acknowledges it.

use crate::error::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status
///
/// Unrecognized wire values are kept in `Other` so the order still loads;
/// the machine refuses to advance them. A record without a status
/// deserializes as `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    #[serde(untagged)]
    Other(String),
}

/// Display colour class of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Red,
    Green,
    Purple,
}

impl OrderStatus {
    /// Next status in the forward order
    ///
    /// Fails with `InvalidTransition` on `Delivered` and on any unrecognized value.
    pub fn advance(&self) -> Result<OrderStatus, OrderError> {
        match self {
            Self::Processing => Ok(Self::Shipped),
            Self::Shipped => Ok(Self::Delivered),
            Self::Delivered | Self::Other(_) => Err(OrderError::InvalidTransition {
                from: self.to_string(),
            }),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Whether the value is one of the three recognized states
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Delivered => StatusTone::Purple,
            Self::Shipped => StatusTone::Green,
            _ => StatusTone::Red,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Processing" => Self::Processing,
            "Shipped" => Self::Shipped,
            "Delivered" => Self::Delivered,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

/// Advance a raw status value
pub fn advance(current: &str) -> Result<OrderStatus, OrderError> {
    OrderStatus::from(current).advance()
}

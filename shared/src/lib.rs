//! Shared types for the canteen admin workspace
//!
//! Order lifecycle types, push message payloads, API response envelopes and
//! error types used by the client and printer crates.

pub mod client;
pub mod error;
pub mod message;
pub mod order;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{OrderError, OrderResult};
pub use message::{EventName, PushMessage, TransactionEvent};
pub use order::{DisplayOrderNumber, Order, OrderItem, OrderStatus, ReceiptSnapshot};
pub use response::{ApiResponse, MessageResponse};

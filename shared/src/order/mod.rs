//! Order lifecycle module
//!
//! - Types: the order record as the backend returns it
//! - Status: the `Processing → Shipped → Delivered` state machine
//! - Number: derived 3-digit display order number
//! - Receipt: immutable snapshot used for printing

pub mod number;
pub mod receipt;
pub mod status;
pub mod types;

// Re-exports
pub use number::{DisplayOrderNumber, display_order_number};
pub use receipt::{ReceiptLine, ReceiptSnapshot};
pub use status::{OrderStatus, StatusTone};
pub use types::*;

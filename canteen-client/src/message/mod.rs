//! Real-time event feed
//!
//! `transport` reads framed events off the wire; `channel` fans them out to
//! every subscribed view.

pub mod channel;
pub mod transport;

pub use channel::{Detacher, PushChannel, Subscription};
pub use shared::message::{EventName, PushMessage, TransactionEvent};
pub use transport::{TcpTransport, Transport};

use thiserror::Error;

/// Event feed errors
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

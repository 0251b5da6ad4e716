//! Push message types
//!
//! Named events delivered by the real-time channel to admin views. The channel
//! provides no acknowledgement and no replay; a message exists only for the
//! duration of one delivery.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// Event names the admin views subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    TransactionCompleted,
    TransactionFailed,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::TransactionCompleted => "transaction_completed",
            EventName::TransactionFailed => "transaction_failed",
        }
    }
}

impl TryFrom<&str> for EventName {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "transaction_completed" => Ok(EventName::TransactionCompleted),
            "transaction_failed" => Ok(EventName::TransactionFailed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Push message envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Per-delivery id, used for tracing only
    pub request_id: Uuid,
    /// Event name as sent on the wire
    pub event: String,
    /// JSON payload
    pub payload: Vec<u8>,
}

impl PushMessage {
    pub fn new(event: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event: event.into(),
            payload,
        }
    }

    /// Build a message with a JSON-encoded payload
    pub fn json<T: Serialize>(event: EventName, data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event.as_str(), serde_json::to_vec(data)?))
    }

    /// Build a `transaction_completed` message
    pub fn transaction_completed(
        payload: &TransactionCompletedPayload,
    ) -> Result<Self, serde_json::Error> {
        Self::json(EventName::TransactionCompleted, payload)
    }

    /// Build a `transaction_failed` message
    pub fn transaction_failed(payload: &TransactionFailedPayload) -> Result<Self, serde_json::Error> {
        Self::json(EventName::TransactionFailed, payload)
    }

    /// Known event name, `None` for events this crate does not model
    pub fn event_name(&self) -> Option<EventName> {
        EventName::try_from(self.event.as_str()).ok()
    }

    /// Decode the JSON payload
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_round_trip() {
        for name in [EventName::TransactionCompleted, EventName::TransactionFailed] {
            assert_eq!(EventName::try_from(name.as_str()), Ok(name));
        }
        assert!(EventName::try_from("transaction_refunded").is_err());
    }

    #[test]
    fn test_json_message() {
        let msg = PushMessage::json(
            EventName::TransactionFailed,
            &TransactionFailedPayload {
                order_id: "o-1".to_string(),
                status: "timeout".to_string(),
            },
        )
        .unwrap();

        assert_eq!(msg.event, "transaction_failed");
        assert_eq!(msg.event_name(), Some(EventName::TransactionFailed));
        assert!(!msg.request_id.is_nil());

        let parsed: TransactionFailedPayload = msg.parse_payload().unwrap();
        assert_eq!(parsed.order_id, "o-1");
    }

    #[test]
    fn test_transaction_completed_message() {
        let msg = PushMessage::transaction_completed(&TransactionCompletedPayload {
            user: "Asha".to_string(),
            amount: 99.5,
        })
        .unwrap();

        assert_eq!(msg.event_name(), Some(EventName::TransactionCompleted));
        let parsed: TransactionCompletedPayload = msg.parse_payload().unwrap();
        assert_eq!(parsed.user, "Asha");
        assert_eq!(parsed.amount, 99.5);
    }
}

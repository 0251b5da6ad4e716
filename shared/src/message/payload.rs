use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EventName, PushMessage};

// ==================== Transaction Payloads ====================

/// `transaction_completed` payload (payment gateway → admin views)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCompletedPayload {
    /// Customer display name or id
    pub user: String,
    pub amount: f64,
}

/// `transaction_failed` payload (payment gateway → admin views)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFailedPayload {
    pub order_id: String,
    /// Status as reported by the gateway, free-form
    pub status: String,
}

// ==================== Transaction Event ====================

/// Transient payment notification
///
/// Advisory only: the order record fetched through the query API is the
/// authority on whether a payment happened.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionEvent {
    Completed { user: String, amount: f64 },
    Failed { order_id: String, status: String },
}

impl TransactionEvent {
    /// Decode a push message
    ///
    /// `Ok(None)` for events that are not transaction events.
    pub fn from_message(msg: &PushMessage) -> Result<Option<Self>, serde_json::Error> {
        let Some(name) = msg.event_name() else {
            return Ok(None);
        };
        let event = match name {
            EventName::TransactionCompleted => {
                let p: TransactionCompletedPayload = msg.parse_payload()?;
                Self::Completed {
                    user: p.user,
                    amount: p.amount,
                }
            }
            EventName::TransactionFailed => {
                let p: TransactionFailedPayload = msg.parse_payload()?;
                Self::Failed {
                    order_id: p.order_id,
                    status: p.status,
                }
            }
        };
        Ok(Some(event))
    }

    pub fn event_name(&self) -> EventName {
        match self {
            Self::Completed { .. } => EventName::TransactionCompleted,
            Self::Failed { .. } => EventName::TransactionFailed,
        }
    }
}

/// Operator-facing alert text
impl fmt::Display for TransactionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { user, amount } => {
                write!(f, "Transaction completed by {} for ₹{}", user, amount)
            }
            Self::Failed { order_id, status } => {
                write!(f, "Transaction failed for order {}: {}", order_id, status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_alert_text() {
        let msg = PushMessage::transaction_completed(&TransactionCompletedPayload {
            user: "Asha".to_string(),
            amount: 250.0,
        })
        .unwrap();
        let event = TransactionEvent::from_message(&msg).unwrap().unwrap();
        assert_eq!(event.to_string(), "Transaction completed by Asha for ₹250");
    }

    #[test]
    fn test_failed_uses_camel_case_wire_name() {
        let msg = PushMessage::new(
            "transaction_failed",
            br#"{"orderId":"ORD77","status":"declined"}"#.to_vec(),
        );
        let event = TransactionEvent::from_message(&msg).unwrap().unwrap();
        assert_eq!(
            event,
            TransactionEvent::Failed {
                order_id: "ORD77".to_string(),
                status: "declined".to_string()
            }
        );
        assert_eq!(event.to_string(), "Transaction failed for order ORD77: declined");
    }

    #[test]
    fn test_other_events_ignored() {
        let msg = PushMessage::new("order_placed", b"{}".to_vec());
        assert_eq!(TransactionEvent::from_message(&msg).unwrap(), None);
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let msg = PushMessage::new("transaction_completed", b"{\"user\":1}".to_vec());
        assert!(TransactionEvent::from_message(&msg).is_err());
    }
}

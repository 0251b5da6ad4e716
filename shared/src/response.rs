//! API Response types
//!
//! Response envelope of the canteen backend

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "success": true,
///     "message": "Order Processed Successfully",
///     "order": { ... }
/// }
/// ```
/// The body fields next to `success`/`message` are flattened into `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Human-readable message (server-provided, may be empty)
    #[serde(default)]
    pub message: String,
    /// Response body
    #[serde(flatten)]
    pub data: T,
}

/// Empty body
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {}

/// Response carrying only `success` and `message` (mutations, errors)
pub type MessageResponse = ApiResponse<Empty>;

impl MessageResponse {
    /// Create a message-only response
    pub fn message(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            data: Empty {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct CountBody {
        count: u32,
    }

    #[test]
    fn test_flattened_body() {
        let resp: ApiResponse<CountBody> =
            serde_json::from_str(r#"{"success":true,"count":3}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_empty());
        assert_eq!(resp.data.count, 3);
    }

    #[test]
    fn test_message_response() {
        let resp: MessageResponse =
            serde_json::from_str(r#"{"success":false,"message":"Invalid Id"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message, "Invalid Id");

        let json = serde_json::to_value(MessageResponse::message(true, "Deleted")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "message": "Deleted"}));
    }
}

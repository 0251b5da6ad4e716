//! Client error types

use shared::OrderError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL or request path cannot form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server rejected the request
    #[error("Server error: {0}")]
    Server(String),

    /// Order lifecycle rule violated locally
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Action requires a loaded order
    #[error("No order loaded")]
    NoOrderLoaded,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message shown to the operator
    ///
    /// Server-reported errors surface the server's own message.
    pub fn operator_message(&self) -> String {
        match self {
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Server(msg)
            | Self::Order(OrderError::MutationFailed(msg)) => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_message_uses_server_text() {
        let err = ClientError::Validation("Invalid Id".to_string());
        assert_eq!(err.operator_message(), "Invalid Id");
        assert_eq!(err.to_string(), "Validation error: Invalid Id");
    }

    #[test]
    fn test_order_error_passthrough() {
        let err: ClientError = OrderError::InvalidTransition {
            from: "Delivered".to_string(),
        }
        .into();
        assert_eq!(
            err.operator_message(),
            "Invalid status transition from \"Delivered\""
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        assert!(ClientError::NotFound("Order Not Found".into()).is_not_found());
        assert!(!ClientError::Server("Order Not Found".into()).is_not_found());
    }

    #[test]
    fn test_mutation_failure_uses_server_text() {
        let err = ClientError::from(OrderError::MutationFailed("Only Admin Allowed".into()));
        assert_eq!(err.operator_message(), "Only Admin Allowed");
        assert_eq!(err.to_string(), "Mutation failed: Only Admin Allowed");
    }
}

//! Error types for the queue client
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate, with typed variants for the cases callers branch on.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific queue scenarios
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("{operation} failed: {status}")]
    ApiStatus { operation: String, status: u16 },

    #[error("{operation} transport error: {message}")]
    ApiTransport { operation: String, message: String },

    #[error("{operation} returned an invalid body: {message}")]
    InvalidResponse { operation: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl QueueError {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        QueueError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Whether this is caller misuse rather than a backend failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, QueueError::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_status_message() {
        let err = QueueError::ApiStatus {
            operation: "add_to_queue".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "add_to_queue failed: 503");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = QueueError::invalid_argument("position must be >= 0").into();
        let typed = err.downcast_ref::<QueueError>().unwrap();
        assert!(typed.is_invalid_argument());
    }
}

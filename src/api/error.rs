//! API error types for the ticket service client.

use thiserror::Error;

/// Errors that can occur when talking to the ticket service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Ticket service returned a server error.
    #[error("Server error: {0}")]
    ServerError(String),

    /// Any other non-success HTTP status.
    #[error("Request failed (HTTP {status}): {context}")]
    RequestFailed {
        /// The HTTP status code.
        status: u16,
        /// Context describing the failed request.
        context: String,
    },

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The server could not be reached at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            404 => ApiError::NotFound(context.to_string()),
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            code => ApiError::RequestFailed {
                status: code,
                context: context.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_404() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "ticket 5");
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "ticket 5"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_from_status_500() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "test");
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[test]
    fn test_error_from_status_400() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "bad description");
        match err {
            ApiError::RequestFailed { status, context } => {
                assert_eq!(status, 400);
                assert_eq!(context, "bad description");
            }
            _ => panic!("Expected RequestFailed error"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("ticket 7".to_string());
        assert_eq!(err.to_string(), "Resource not found: ticket 7");

        let err = ApiError::RequestFailed {
            status: 422,
            context: "create ticket".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (HTTP 422): create ticket");
    }
}

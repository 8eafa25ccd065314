//! Centralized error types.
//!
//! A unified error hierarchy with user-friendly messages, built on
//! `thiserror`. API and config errors convert into [`AppError`] at the
//! application boundary.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup/teardown errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find the configuration directory.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the config file. Check that it exists and is readable."
                        .to_string()
                }
                ConfigError::WriteError(_) => {
                    "Could not save the configuration. Check file permissions.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "The config file is invalid. Check the file format.".to_string()
                }
                ConfigError::SerializeError(_) => {
                    "Could not save the configuration. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::NotFound(resource) => format!("{}.", resource),
                ApiError::ServerError(_) => {
                    "The ticket service reported an error. Please try again later.".to_string()
                }
                ApiError::RequestFailed { .. } => {
                    "The ticket service rejected the request.".to_string()
                }
                ApiError::Network(_) | ApiError::ConnectionFailed(_) => {
                    "Could not reach the ticket service. Check that it is running.".to_string()
                }
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the ticket service.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let err: AppError = ApiError::NotFound("Ticket 5 not found".to_string()).into();
        assert!(matches!(err, AppError::Api(ApiError::NotFound(_))));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::Api(ApiError::NotFound("Ticket 5 not found".to_string()));
        assert_eq!(err.user_message(), "Ticket 5 not found.");
    }

    #[test]
    fn test_user_message_connection_failed() {
        let err = AppError::Api(ApiError::ConnectionFailed("refused".to_string()));
        assert!(err.user_message().contains("Could not reach"));
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "server_url cannot be empty".to_string(),
        ));
        assert!(err.user_message().contains("server_url cannot be empty"));
    }

    #[test]
    fn test_user_message_server_error() {
        let err = AppError::Api(ApiError::ServerError("HTTP 500".to_string()));
        assert!(err.user_message().contains("try again later"));
    }
}

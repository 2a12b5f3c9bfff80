//! Error types for Chatterbox
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Chatterbox operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, chatroom persistence, session handling,
/// reply generation, and the mock authentication flow.
#[derive(Error, Debug)]
pub enum ChatterboxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input that fails validation (empty title, blank message, etc.)
    ///
    /// These are surfaced as transient notices at the REPL and never
    /// change any state.
    #[error("{0}")]
    Validation(String),

    /// Chatroom storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Reply-generation errors (unknown responder, responder failure)
    #[error("Responder error: {0}")]
    Responder(String),

    /// Mock authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Image attachment errors (unreadable file, not an image)
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// Clipboard access errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Chatterbox operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ChatterboxError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_validation_error_display() {
        let error = ChatterboxError::Validation("Please enter a title".to_string());
        assert_eq!(error.to_string(), "Please enter a title");
    }

    #[test]
    fn test_storage_error_display() {
        let error = ChatterboxError::Storage("database connection failed".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: database connection failed"
        );
    }

    #[test]
    fn test_responder_error_display() {
        let error = ChatterboxError::Responder("unknown responder type".to_string());
        assert_eq!(error.to_string(), "Responder error: unknown responder type");
    }

    #[test]
    fn test_auth_error_display() {
        let error = ChatterboxError::Auth("OTP mismatch".to_string());
        assert_eq!(error.to_string(), "Authentication error: OTP mismatch");
    }

    #[test]
    fn test_attachment_error_display() {
        let error = ChatterboxError::Attachment("not an image".to_string());
        assert_eq!(error.to_string(), "Attachment error: not an image");
    }

    #[test]
    fn test_clipboard_error_display() {
        let error = ChatterboxError::Clipboard("no display".to_string());
        assert_eq!(error.to_string(), "Clipboard error: no display");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ChatterboxError = io_error.into();
        assert!(matches!(error, ChatterboxError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: ChatterboxError = json_error.into();
        assert!(matches!(error, ChatterboxError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: ChatterboxError = yaml_error.into();
        assert!(matches!(error, ChatterboxError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatterboxError>();
    }
}

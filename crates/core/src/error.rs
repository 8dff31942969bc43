//! Error types for st-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for st-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for st-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cloud profile not found
    #[error("Cloud not found: {0}")]
    CloudNotFound(String),

    /// Cloud profile already exists
    #[error("Cloud already exists: {0}")]
    CloudExists(String),

    /// Invalid filter value (unparseable timestamp)
    #[error("Invalid filter value: {0}")]
    InvalidFilter(String),

    /// Unknown resource type name (skip-list token)
    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found (unresolvable project name/ID included)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Aggregate cleanup failure, raised after all resource types
    /// have been processed
    #[error("{0}")]
    Cleanup(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,                             // UsageError
            Error::InvalidFilter(_) => 2,                      // UsageError
            Error::UnknownResourceType(_) => 2,                // UsageError
            Error::Network(_) => 3,                            // NetworkError
            Error::Auth(_) => 4,                               // AuthError
            Error::NotFound(_) | Error::CloudNotFound(_) => 5, // NotFound
            Error::Conflict(_) | Error::CloudExists(_) => 6,   // Conflict
            _ => 1,                                            // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::InvalidFilter("test".into()).exit_code(), 2);
        assert_eq!(Error::UnknownResourceType("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::CloudNotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::Conflict("test".into()).exit_code(), 6);
        assert_eq!(Error::CloudExists("test".into()).exit_code(), 6);
        assert_eq!(Error::Cleanup("test".into()).exit_code(), 1);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::CloudNotFound("devstack".into());
        assert_eq!(err.to_string(), "Cloud not found: devstack");

        let err = Error::Cleanup("2 of 3 volumes failed to delete.".into());
        assert_eq!(err.to_string(), "2 of 3 volumes failed to delete.");
    }
}

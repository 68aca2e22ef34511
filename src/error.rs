//! Custom error types for Buckwheat
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Buckwheat operations
#[derive(Error, Debug)]
pub enum BuckwheatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// No wallet has been set up yet
    #[error("No budget has been set up. Run 'buckwheat wallet set' first")]
    NoWallet,

    /// Replacing the wallet would orphan recorded spends
    #[error("The current period already has {spends} spend(s); pass --confirm to start a new budget")]
    ConfirmationRequired { spends: usize },

    /// Budget-related errors
    #[error("Budget error: {0}")]
    Budget(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backup and restore errors
    #[error("Backup error: {0}")]
    Backup(String),
}

impl BuckwheatError {
    /// Create a "not found" error for spends
    pub fn spend_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Spend",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for currencies
    pub fn currency_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Currency",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BuckwheatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BuckwheatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Buckwheat operations
pub type BuckwheatResult<T> = Result<T, BuckwheatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuckwheatError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BuckwheatError::spend_not_found("spd-1234abcd");
        assert_eq!(err.to_string(), "Spend not found: spd-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_confirmation_required_error() {
        let err = BuckwheatError::ConfirmationRequired { spends: 3 };
        assert!(err.to_string().contains("3 spend(s)"));
        assert!(err.to_string().contains("--confirm"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuckwheatError = io_err.into();
        assert!(matches!(err, BuckwheatError::Io(_)));
    }
}

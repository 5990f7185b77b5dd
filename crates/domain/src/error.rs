//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for field-level rule violations.
    ///
    /// Use this when a value handed to a constructor breaks a domain rule:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    /// - Codes do not match their expected format
    ///
    /// # Example
    /// ```ignore
    /// if code.len() != 3 {
    ///     return Err(DomainError::validation("Currency must be a 3-letter ISO code"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// The message without the variant prefix, suitable for API responses.
    pub fn detail(&self) -> String {
        match self {
            Self::Validation(msg) | Self::InvalidId(msg) | Self::Parse(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("Due amount must not be negative");
        assert_eq!(
            err.to_string(),
            "Validation failed: Due amount must not be negative"
        );
        assert_eq!(err.detail(), "Due amount must not be negative");
    }

    #[test]
    fn test_invalid_id_error() {
        let err = DomainError::invalid_id("'abc' is not a valid payment id");
        assert_eq!(err.to_string(), "Invalid ID format: 'abc' is not a valid payment id");
        assert_eq!(err.detail(), "'abc' is not a valid payment id");
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown payment status: paid");
        assert_eq!(err.to_string(), "Parse error: Unknown payment status: paid");
    }
}

//! Error handling for the resolver boundary.
//!
//! Resolution itself never fails: an unsupported host is a skipped outcome,
//! not an error. These types cover building a request (loading it from a
//! file or flags, and validating its fields).

use thiserror::Error;

/// Main error type for the resolver
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Configuration errors (loading, parsing, missing flags)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (request fields)
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;

impl ResolverError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolverError::config("missing --os");
        assert_eq!(err.to_string(), "Configuration error: missing --os");

        let err = ResolverError::validation("package dir must be absolute");
        assert_eq!(err.to_string(), "Validation error: package dir must be absolute");
    }

    #[test]
    fn test_constructors_pick_variant() {
        assert!(matches!(ResolverError::config("x"), ResolverError::Config(_)));
        assert!(matches!(ResolverError::validation("x"), ResolverError::Validation(_)));
    }
}
